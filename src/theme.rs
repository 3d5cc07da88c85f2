//! Centralized theme constants for Picsum Gallery
//! All colors, sizes, and styling should reference these constants

use egui::Color32;

// =============================================================================
// COLORS - Backgrounds
// =============================================================================
pub const BG_BASE: Color32 = Color32::from_rgb(0x09, 0x09, 0x0b); // zinc-950
pub const BG_ELEVATED: Color32 = Color32::from_rgb(0x18, 0x18, 0x1b); // zinc-900
pub const BG_SURFACE: Color32 = Color32::from_rgb(0x27, 0x27, 0x2a); // zinc-800
pub const BG_HOVER: Color32 = Color32::from_rgb(0x1f, 0x1f, 0x22);

// =============================================================================
// COLORS - Header (Orange)
// =============================================================================
pub const HEADER_FILL: Color32 = Color32::from_rgb(0xfd, 0xba, 0x74); // orange-300

// =============================================================================
// COLORS - Text
// =============================================================================
pub const TEXT_PRIMARY: Color32 = Color32::WHITE;
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0xe4, 0xe4, 0xe7); // zinc-200
pub const TEXT_MUTED: Color32 = Color32::from_rgb(0xa1, 0xa1, 0xaa); // zinc-400
pub const TEXT_DIM: Color32 = Color32::from_rgb(0x71, 0x71, 0x7a); // zinc-500

// =============================================================================
// COLORS - Borders
// =============================================================================
pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(0x27, 0x27, 0x2a); // zinc-800

// =============================================================================
// COLORS - Cards
// =============================================================================
pub const CAPTION_FILL: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 128); // black 50%
pub const CARD_SHADOW: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 90);
pub const STATUS_ERROR: Color32 = Color32::from_rgb(0xf8, 0x71, 0x71); // red-400

// =============================================================================
// COLORS - Buttons
// =============================================================================
// Pagination (gray) button
pub const BTN_DEFAULT: Color32 = Color32::from_rgb(0x3f, 0x3f, 0x46); // zinc-700

// Load more (blue) button
pub const BTN_ACCENT: Color32 = Color32::from_rgb(0x3b, 0x82, 0xf6); // blue-500

// Disabled state
pub const BTN_DISABLED: Color32 = Color32::from_rgb(0x27, 0x27, 0x2a); // zinc-800
pub const BTN_DISABLED_TEXT: Color32 = Color32::from_rgb(0x71, 0x71, 0x7a); // zinc-500

// =============================================================================
// TYPOGRAPHY - Font Sizes
// =============================================================================
pub const FONT_TITLE: f32 = 24.0;
pub const FONT_BODY: f32 = 14.0;
pub const FONT_LABEL: f32 = 13.0;

// =============================================================================
// DIMENSIONS - Layout
// =============================================================================
pub const HEADER_HEIGHT: f32 = 64.0;
pub const CONTENT_PADDING_X: f32 = 16.0;
pub const CONTENT_PADDING_Y: f32 = 32.0;

// =============================================================================
// DIMENSIONS - Components
// =============================================================================
pub const BUTTON_WIDTH: f32 = 96.0;
pub const BUTTON_WIDTH_WIDE: f32 = 130.0;
pub const BUTTON_HEIGHT: f32 = 36.0;
pub const PAGE_LABEL_WIDTH: f32 = 72.0;
pub const SPINNER_SIZE: f32 = 18.0;

// =============================================================================
// DIMENSIONS - Grid Cards
// =============================================================================
pub const CARD_HEIGHT: f32 = 320.0;
pub const CAPTION_HEIGHT: f32 = 32.0;

/// Window widths at which the grid gains a column (2, 3 and 4 columns)
pub const GRID_BREAKPOINTS: [f32; 3] = [640.0, 768.0, 1024.0];

// =============================================================================
// CORNER RADIUS
// =============================================================================
pub const RADIUS_DEFAULT: f32 = 4.0;
pub const RADIUS_LARGE: f32 = 8.0;

// =============================================================================
// STROKE WIDTHS
// =============================================================================
pub const STROKE_DEFAULT: f32 = 1.0;
pub const STROKE_MEDIUM: f32 = 1.5;

// =============================================================================
// SPACING
// =============================================================================
pub const SPACING_MD: f32 = 8.0;
pub const SPACING_XL: f32 = 16.0;

// =============================================================================
// HELPER - Apply global visuals
// =============================================================================
pub fn apply_visuals(ctx: &egui::Context) {
    ctx.set_visuals(egui::Visuals {
        dark_mode: true,
        panel_fill: BG_BASE,
        window_fill: Color32::from_rgb(0x1a, 0x1a, 0x1e), // Slightly elevated for popups/menus
        extreme_bg_color: BG_BASE,
        faint_bg_color: BG_ELEVATED,
        selection: egui::style::Selection {
            bg_fill: Color32::from_rgb(0x3a, 0x3a, 0x3f),
            stroke: egui::Stroke::NONE,
        },
        widgets: egui::style::Widgets {
            noninteractive: egui::style::WidgetVisuals {
                bg_fill: BG_ELEVATED,
                weak_bg_fill: BG_SURFACE,
                bg_stroke: egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE),
                fg_stroke: egui::Stroke::new(STROKE_DEFAULT, TEXT_PRIMARY),
                corner_radius: RADIUS_DEFAULT.into(),
                expansion: 0.0,
            },
            inactive: egui::style::WidgetVisuals {
                bg_fill: Color32::TRANSPARENT,
                weak_bg_fill: BG_ELEVATED,
                bg_stroke: egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE),
                fg_stroke: egui::Stroke::new(STROKE_DEFAULT, TEXT_SECONDARY),
                corner_radius: RADIUS_DEFAULT.into(),
                expansion: 0.0,
            },
            hovered: egui::style::WidgetVisuals {
                bg_fill: BG_HOVER,
                weak_bg_fill: Color32::from_rgb(0x30, 0x30, 0x35),
                bg_stroke: egui::Stroke::NONE,
                fg_stroke: egui::Stroke::new(STROKE_MEDIUM, TEXT_PRIMARY),
                corner_radius: RADIUS_DEFAULT.into(),
                expansion: 0.0,
            },
            ..egui::Visuals::dark().widgets
        },
        interact_cursor: Some(egui::CursorIcon::PointingHand),
        popup_shadow: egui::epaint::Shadow {
            offset: [0, 4],
            blur: 12,
            spread: 0,
            color: Color32::from_black_alpha(80),
        },
        window_stroke: egui::Stroke::new(1.0, Color32::from_rgb(0x2a, 0x2a, 0x2e)),
        menu_corner_radius: egui::CornerRadius::same(8),
        ..egui::Visuals::dark()
    });

    ctx.style_mut(|style| {
        style.interaction.selectable_labels = false;
        style.spacing.menu_margin = egui::Margin::symmetric(6, 4);
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.scroll.bar_width = 6.0;
        style.spacing.scroll.floating = false;
    });
}

// =============================================================================
// HELPER - Context menu
// =============================================================================

/// Context menu item with icon. Returns true if clicked.
pub fn menu_item(ui: &mut egui::Ui, icon: &str, label: &str) -> bool {
    let text = format!("{}  {}", icon, label);
    let w = ui.available_width();
    let (rect, response) = ui.allocate_exact_size(egui::vec2(w, 24.0), egui::Sense::click());
    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        ui.painter().rect_filled(rect, RADIUS_DEFAULT, lighten(BG_SURFACE, 0.12));
    }
    let text_pos = rect.left_center() + egui::vec2(8.0, 0.0);
    ui.painter().text(
        text_pos,
        egui::Align2::LEFT_CENTER,
        text,
        egui::FontId::proportional(FONT_LABEL),
        TEXT_SECONDARY,
    );
    response.clicked()
}

/// Sets context menu width to 1.5x the widest label.
pub fn set_menu_width(ui: &mut egui::Ui, labels: &[&str]) {
    let max_text = labels
        .iter()
        .map(|l| {
            ui.fonts(|f| {
                f.layout_no_wrap(l.to_string(), egui::FontId::proportional(FONT_LABEL), TEXT_SECONDARY)
                    .rect
                    .width()
            })
        })
        .fold(0.0_f32, f32::max);
    let w = (max_text + 16.0) * 1.5;
    ui.set_min_width(w);
    ui.set_max_width(w);
}

// =============================================================================
// HELPER - Button visuals
// =============================================================================

/// Returns (fill, draw_rect) for a custom-painted button with hover/press effects.
/// Lightens on hover, slightly lightens + shrinks on press.
pub fn button_visual(
    response: &egui::Response,
    base_fill: Color32,
    rect: egui::Rect,
) -> (Color32, egui::Rect) {
    if response.is_pointer_button_down_on() {
        (lighten(base_fill, 0.06), rect.shrink(1.5))
    } else if response.hovered() {
        (lighten(base_fill, 0.12), rect)
    } else {
        (base_fill, rect)
    }
}

pub fn lighten(c: Color32, amount: f32) -> Color32 {
    let r = (c.r() as f32 + (255.0 - c.r() as f32) * amount) as u8;
    let g = (c.g() as f32 + (255.0 - c.g() as f32) * amount) as u8;
    let b = (c.b() as f32 + (255.0 - c.b() as f32) * amount) as u8;
    Color32::from_rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lighten_moves_toward_white() {
        assert_eq!(lighten(Color32::BLACK, 0.0), Color32::BLACK);
        assert_eq!(lighten(Color32::BLACK, 1.0), Color32::WHITE);
        let c = lighten(BTN_ACCENT, 0.12);
        assert!(c.r() > BTN_ACCENT.r() && c.g() > BTN_ACCENT.g());
    }

    #[test]
    fn breakpoints_ascend() {
        assert!(GRID_BREAKPOINTS.windows(2).all(|w| w[0] < w[1]));
    }
}
