//! Reusable UI components
//!
//! Layout math is kept free of egui state so it can be tested directly.

use crate::theme;
use eframe::egui;

/// Number of grid columns for a given available width.
pub fn grid_columns(width: f32) -> usize {
    1 + theme::GRID_BREAKPOINTS.iter().filter(|&&bp| width >= bp).count()
}

/// Width of one card when `cols` cards share `available` with `spacing` gaps.
pub fn card_width(available: f32, cols: usize, spacing: f32) -> f32 {
    let cols = cols.max(1) as f32;
    ((available - spacing * (cols - 1.0)) / cols).floor().max(1.0)
}

/// UV rect that crops an image of `image_size` to fill `target` without
/// distortion (CSS `object-fit: cover`), keeping the crop centered.
pub fn cover_uv(image_size: egui::Vec2, target: egui::Vec2) -> egui::Rect {
    let full = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
    if image_size.x <= 0.0 || image_size.y <= 0.0 || target.x <= 0.0 || target.y <= 0.0 {
        return full;
    }
    let image_aspect = image_size.x / image_size.y;
    let target_aspect = target.x / target.y;
    if image_aspect > target_aspect {
        // Wider than the card: crop left/right
        let visible = target_aspect / image_aspect;
        let margin = (1.0 - visible) / 2.0;
        egui::Rect::from_min_max(egui::pos2(margin, 0.0), egui::pos2(1.0 - margin, 1.0))
    } else {
        let visible = image_aspect / target_aspect;
        let margin = (1.0 - visible) / 2.0;
        egui::Rect::from_min_max(egui::pos2(0.0, margin), egui::pos2(1.0, 1.0 - margin))
    }
}

/// Caption shown on each card
pub fn author_caption(author: &str) -> String {
    format!("Author: {}", author)
}

/// Label of the page indicator
pub fn page_label(page: u32) -> String {
    format!("Page {}", page)
}

/// Hint under the load-more button
pub fn batch_label(batch_size: u32) -> String {
    format!("{} per batch", batch_size)
}

/// Custom-painted button with fixed size. Disabled buttons ignore clicks.
pub fn action_button(
    ui: &mut egui::Ui,
    label: &str,
    fill: egui::Color32,
    width: f32,
    enabled: bool,
) -> egui::Response {
    let sense = if enabled { egui::Sense::click() } else { egui::Sense::hover() };
    let (rect, response) = ui.allocate_exact_size(egui::vec2(width, theme::BUTTON_HEIGHT), sense);

    if ui.is_rect_visible(rect) {
        let (fill, draw_rect, text_color) = if enabled {
            let (fill, draw_rect) = theme::button_visual(&response, fill, rect);
            (fill, draw_rect, theme::TEXT_PRIMARY)
        } else {
            (theme::BTN_DISABLED, rect, theme::BTN_DISABLED_TEXT)
        };
        let painter = ui.painter();
        painter.rect_filled(draw_rect, theme::RADIUS_LARGE, fill);
        painter.text(
            draw_rect.center(),
            egui::Align2::CENTER_CENTER,
            label,
            egui::FontId::proportional(theme::FONT_BODY),
            text_color,
        );
    }

    if enabled && response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    response
}

/// Disabled accent button with a spinner and "Loading..." text.
pub fn loading_button(ui: &mut egui::Ui, width: f32) -> egui::Response {
    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(width, theme::BUTTON_HEIGHT), egui::Sense::hover());

    if ui.is_rect_visible(rect) {
        ui.painter()
            .rect_filled(rect, theme::RADIUS_LARGE, theme::lighten(theme::BTN_ACCENT, 0.25));

        let text = "Loading...";
        let font = egui::FontId::proportional(theme::FONT_BODY);
        let text_w = ui.fonts(|f| {
            f.layout_no_wrap(text.to_string(), font.clone(), theme::TEXT_PRIMARY)
                .rect
                .width()
        });
        let gap = theme::SPACING_MD;
        let content_w = theme::SPINNER_SIZE + gap + text_w;
        let left = rect.center().x - content_w / 2.0;

        let spinner_rect = egui::Rect::from_center_size(
            egui::pos2(left + theme::SPINNER_SIZE / 2.0, rect.center().y),
            egui::vec2(theme::SPINNER_SIZE, theme::SPINNER_SIZE),
        );
        egui::Spinner::new()
            .size(theme::SPINNER_SIZE)
            .color(theme::TEXT_PRIMARY)
            .paint_at(ui, spinner_rect);

        ui.painter().text(
            egui::pos2(spinner_rect.right() + gap, rect.center().y),
            egui::Align2::LEFT_CENTER,
            text,
            font,
            theme::TEXT_PRIMARY,
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn columns_follow_breakpoints() {
        assert_eq!(grid_columns(320.0), 1);
        assert_eq!(grid_columns(639.0), 1);
        assert_eq!(grid_columns(640.0), 2);
        assert_eq!(grid_columns(767.0), 2);
        assert_eq!(grid_columns(768.0), 3);
        assert_eq!(grid_columns(1023.0), 3);
        assert_eq!(grid_columns(1024.0), 4);
        assert_eq!(grid_columns(2560.0), 4);
    }

    #[test]
    fn card_width_fills_row() {
        let w = card_width(1000.0, 4, 16.0);
        assert_eq!(w, 238.0);
        assert!(w * 4.0 + 16.0 * 3.0 <= 1000.0);
        assert_eq!(card_width(500.0, 1, 16.0), 500.0);
        assert_eq!(card_width(500.0, 0, 16.0), 500.0);
    }

    #[test]
    fn cover_crops_wide_image_horizontally() {
        // 2:1 image into a 1:1 card keeps the middle half
        let uv = cover_uv(egui::vec2(200.0, 100.0), egui::vec2(100.0, 100.0));
        assert!(approx(uv.min.x, 0.25) && approx(uv.max.x, 0.75));
        assert!(approx(uv.min.y, 0.0) && approx(uv.max.y, 1.0));
    }

    #[test]
    fn cover_crops_tall_image_vertically() {
        let uv = cover_uv(egui::vec2(100.0, 400.0), egui::vec2(100.0, 100.0));
        assert!(approx(uv.min.x, 0.0) && approx(uv.max.x, 1.0));
        assert!(approx(uv.min.y, 0.375) && approx(uv.max.y, 0.625));
    }

    #[test]
    fn cover_keeps_matching_aspect_whole() {
        let uv = cover_uv(egui::vec2(640.0, 320.0), egui::vec2(300.0, 150.0));
        assert!(approx(uv.min.x, 0.0) && approx(uv.max.x, 1.0));
        assert!(approx(uv.min.y, 0.0) && approx(uv.max.y, 1.0));
    }

    #[test]
    fn cover_handles_degenerate_sizes() {
        let uv = cover_uv(egui::vec2(0.0, 100.0), egui::vec2(100.0, 100.0));
        assert_eq!(uv, egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)));
    }

    #[test]
    fn labels() {
        assert_eq!(author_caption("Paul Jarvis"), "Author: Paul Jarvis");
        assert_eq!(page_label(3), "Page 3");
        assert_eq!(batch_label(12), "12 per batch");
    }
}
