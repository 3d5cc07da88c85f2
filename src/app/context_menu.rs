//! Context menu for gallery cards

use crate::theme;
use crate::types::ImageRecord;
use eframe::egui;
use tracing::{debug, warn};

pub(crate) fn card_context_menu(ui: &mut egui::Ui, record: &ImageRecord) {
    ui.spacing_mut().item_spacing.y = 2.0;

    let labels = [
        format!("{}  Open in browser", egui_phosphor::regular::ARROW_SQUARE_OUT),
        format!("{}  Copy image URL", egui_phosphor::regular::COPY),
    ];
    let label_refs: Vec<&str> = labels.iter().map(|s| s.as_str()).collect();
    theme::set_menu_width(ui, &label_refs);

    if theme::menu_item(ui, egui_phosphor::regular::ARROW_SQUARE_OUT, "Open in browser") {
        let url = record.browse_url();
        debug!(%url, "Opening in browser");
        if let Err(e) = open::that_detached(url) {
            warn!(%url, error = %e, "Failed to open browser");
        }
        ui.close_menu();
    }
    if theme::menu_item(ui, egui_phosphor::regular::COPY, "Copy image URL") {
        ui.ctx().copy_text(record.download_url.clone());
        ui.close_menu();
    }
}
