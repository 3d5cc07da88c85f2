//! View rendering (header, image grid, pagination and load-more controls)

use super::context_menu::card_context_menu;
use super::App;
use crate::theme;
use crate::types::{ImageRecord, ThumbnailState};
use crate::ui::components::{
    action_button, author_caption, batch_label, card_width, cover_uv, grid_columns, loading_button,
    page_label,
};
use eframe::egui;

/// What a card can paint for its image this frame
enum CardImage {
    Texture(egui::TextureId, egui::Vec2),
    Loading,
    Failed,
}

/// Buttons pressed in the control panel this frame
#[derive(Default)]
struct ControlActions {
    prev: bool,
    next: bool,
    load_more: bool,
}

impl App {
    pub(crate) fn render_header(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header")
            .exact_height(theme::HEADER_HEIGHT)
            .show_separator_line(false)
            .frame(egui::Frame::new().fill(theme::HEADER_FILL))
            .show(ctx, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new("Responsive Image Gallery")
                                .size(theme::FONT_TITLE)
                                .color(theme::TEXT_PRIMARY),
                        )
                        .selectable(false),
                    );
                });
            });
    }

    pub(crate) fn render_controls(&mut self, ctx: &egui::Context) {
        let mut actions = ControlActions::default();

        egui::TopBottomPanel::bottom("controls")
            .show_separator_line(false)
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::symmetric(16, 12)),
            )
            .show(ctx, |ui| {
                // Pagination row
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing.x = theme::SPACING_XL;
                    let row_w = theme::BUTTON_WIDTH * 2.0
                        + theme::PAGE_LABEL_WIDTH
                        + theme::SPACING_XL * 2.0;
                    ui.add_space(((ui.available_width() - row_w) / 2.0).max(0.0));

                    let can_prev = self.gallery.can_go_prev();
                    actions.prev = action_button(
                        ui,
                        "Previous",
                        theme::BTN_DEFAULT,
                        theme::BUTTON_WIDTH,
                        can_prev,
                    )
                    .clicked();

                    let (rect, _) = ui.allocate_exact_size(
                        egui::vec2(theme::PAGE_LABEL_WIDTH, theme::BUTTON_HEIGHT),
                        egui::Sense::hover(),
                    );
                    ui.painter().text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        page_label(self.gallery.page()),
                        egui::FontId::proportional(theme::FONT_BODY),
                        theme::TEXT_SECONDARY,
                    );

                    actions.next =
                        action_button(ui, "Next", theme::BTN_DEFAULT, theme::BUTTON_WIDTH, true)
                            .clicked();
                });

                ui.add_space(theme::SPACING_XL);

                // Load more
                ui.horizontal(|ui| {
                    ui.add_space(((ui.available_width() - theme::BUTTON_WIDTH_WIDE) / 2.0).max(0.0));
                    if self.gallery.is_loading() {
                        loading_button(ui, theme::BUTTON_WIDTH_WIDE);
                    } else {
                        actions.load_more = action_button(
                            ui,
                            "Load More",
                            theme::BTN_ACCENT,
                            theme::BUTTON_WIDTH_WIDE,
                            self.gallery.can_load_more(),
                        )
                        .clicked();
                    }
                });

                ui.add_space(theme::SPACING_MD);
                ui.vertical_centered(|ui| {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(batch_label(self.gallery.batch_size()))
                                .size(theme::FONT_LABEL)
                                .color(theme::TEXT_DIM),
                        )
                        .selectable(false),
                    );
                });
            });

        if actions.prev {
            self.prev_page(ctx);
        }
        if actions.next {
            self.next_page(ctx);
        }
        if actions.load_more {
            self.load_more(ctx);
        }
    }

    pub(crate) fn render_grid(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        // Breakpoints refer to the window width, like CSS media queries
        let cols = grid_columns(ctx.screen_rect().width());
        self.ensure_thumbnails(ctx);
        let gallery = &self.gallery;
        let thumbnails = &self.thumbnails;

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .id_salt("gallery_scroll")
            .show(ui, |ui| {
                egui::Frame::new()
                    .inner_margin(egui::Margin::symmetric(
                        theme::CONTENT_PADDING_X as i8,
                        theme::CONTENT_PADDING_Y as i8,
                    ))
                    .show(ui, |ui| {
                        if gallery.images().is_empty() {
                            render_empty(ui, gallery.is_loading());
                            return;
                        }

                        let spacing = theme::SPACING_XL;
                        let card_w = card_width(ui.available_width(), cols, spacing);

                        ui.horizontal_wrapped(|ui| {
                            ui.spacing_mut().item_spacing = egui::vec2(spacing, spacing);
                            for record in gallery.images() {
                                render_card(ui, record, thumbnails.get(&record.download_url), card_w);
                            }
                        });
                    });
            });
    }
}

fn render_empty(ui: &mut egui::Ui, loading: bool) {
    ui.vertical_centered(|ui| {
        ui.add_space(theme::CARD_HEIGHT / 2.0);
        if loading {
            ui.add(egui::Spinner::new().size(32.0).color(theme::TEXT_MUTED));
        } else {
            ui.add(
                egui::Label::new(
                    egui::RichText::new("No images")
                        .size(theme::FONT_BODY)
                        .color(theme::TEXT_DIM),
                )
                .selectable(false),
            );
        }
    });
}

fn render_card(
    ui: &mut egui::Ui,
    record: &ImageRecord,
    thumbnail: Option<&ThumbnailState>,
    card_w: f32,
) {
    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(card_w, theme::CARD_HEIGHT), egui::Sense::click());

    if ui.is_rect_visible(rect) {
        let image = match thumbnail {
            Some(ThumbnailState::Ready(tex)) => CardImage::Texture(tex.id(), tex.size_vec2()),
            Some(ThumbnailState::Loading) | None => CardImage::Loading,
            Some(ThumbnailState::Failed) => CardImage::Failed,
        };
        let radius = theme::RADIUS_LARGE as u8;
        let painter = ui.painter().with_clip_rect(rect.expand(4.0));

        // Drop shadow, then base
        painter.rect_filled(
            rect.translate(egui::vec2(0.0, 2.0)),
            theme::RADIUS_LARGE,
            theme::CARD_SHADOW,
        );
        painter.rect_filled(rect, theme::RADIUS_LARGE, theme::BG_ELEVATED);

        match image {
            CardImage::Texture(texture_id, size) => {
                // Textured RectShape clips the image to rounded corners
                let brush = egui::epaint::Brush {
                    fill_texture_id: texture_id,
                    uv: cover_uv(size, rect.size()),
                };
                let mut shape = egui::epaint::RectShape::filled(
                    rect,
                    egui::CornerRadius::same(radius),
                    egui::Color32::WHITE,
                );
                shape.brush = Some(std::sync::Arc::new(brush));
                painter.add(shape);
            }
            CardImage::Loading => {
                let spinner_rect =
                    egui::Rect::from_center_size(rect.center(), egui::vec2(24.0, 24.0));
                egui::Spinner::new()
                    .size(24.0)
                    .color(theme::TEXT_DIM)
                    .paint_at(ui, spinner_rect);
            }
            CardImage::Failed => {
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    egui_phosphor::regular::IMAGE,
                    egui::FontId::proportional(32.0),
                    theme::STATUS_ERROR,
                );
            }
        }

        if response.hovered() {
            painter.rect_filled(
                rect,
                theme::RADIUS_LARGE,
                egui::Color32::from_rgba_unmultiplied(255, 255, 255, 12),
            );
        }

        // Caption strip along the bottom edge
        let caption_rect = egui::Rect::from_min_max(
            egui::pos2(rect.left(), rect.bottom() - theme::CAPTION_HEIGHT),
            rect.right_bottom(),
        );
        painter.rect_filled(
            caption_rect,
            egui::CornerRadius {
                nw: 0,
                ne: 0,
                sw: radius,
                se: radius,
            },
            theme::CAPTION_FILL,
        );
        painter.with_clip_rect(caption_rect).text(
            caption_rect.center(),
            egui::Align2::CENTER_CENTER,
            author_caption(&record.author),
            egui::FontId::proportional(theme::FONT_LABEL),
            theme::TEXT_PRIMARY,
        );

        painter.rect_stroke(
            rect,
            theme::RADIUS_LARGE,
            egui::Stroke::new(theme::STROKE_DEFAULT, theme::BORDER_SUBTLE),
            egui::StrokeKind::Outside,
        );
    }

    let response = match (record.width, record.height) {
        (Some(w), Some(h)) => response.on_hover_text(format!("{} × {}", w, h)),
        _ => response,
    };
    response.context_menu(|ui| card_context_menu(ui, record));
}
