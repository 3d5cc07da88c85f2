//! Utility functions

use crate::constants::APP_NAME;
use std::path::PathBuf;

// Square viewBox, for window/taskbar icons
pub const ICON_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 64"><rect x="2" y="2" width="60" height="60" rx="12" fill="#fdba74"/><rect x="10" y="14" width="44" height="36" rx="4" fill="#fff"/><circle cx="23" cy="25" r="5" fill="#fdba74"/><path d="M12 46l14-14 9 9 7-7 10 12z" fill="#09090b"/></svg>"##;

/// Rasterize the icon SVG to a square RGBA image (for window/taskbar icons).
pub fn rasterize_icon(size: u32) -> Option<(Vec<u8>, u32, u32)> {
    let tree = resvg::usvg::Tree::from_str(ICON_SVG, &resvg::usvg::Options::default()).ok()?;
    let scale = size as f32 / tree.size().width();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size, size)?;
    resvg::render(
        &tree,
        resvg::usvg::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Some((premul_to_straight(&pixmap), size, size))
}

fn premul_to_straight(pixmap: &resvg::tiny_skia::Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let a = p.alpha();
            if a == 0 {
                [0, 0, 0, 0]
            } else {
                let r = (p.red() as u16 * 255 / a as u16) as u8;
                let g = (p.green() as u16 * 255 / a as u16) as u8;
                let b = (p.blue() as u16 * 255 / a as u16) as u8;
                [r, g, b, a]
            }
        })
        .collect()
}

/// Get the app data directory (settings, logs)
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_rasterizes_to_requested_square() {
        let (pixels, w, h) = rasterize_icon(32).expect("icon should rasterize");
        assert_eq!((w, h), (32, 32));
        assert_eq!(pixels.len(), 32 * 32 * 4);
        // Corner sits outside the rounded rect
        assert_eq!(pixels[3], 0);
    }

    #[test]
    fn data_dir_ends_with_app_name() {
        assert!(get_data_dir().ends_with(APP_NAME));
    }
}
