//! App module - contains the main application state and logic

mod context_menu;
mod fetch;
mod thumbnails;
mod views;

use crate::api::PicsumClient;
use crate::gallery::Gallery;
use crate::settings::Settings;
use crate::theme;
use crate::types::*;
use eframe::egui;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::Semaphore;
use tracing::{error, info};

/// Results handed from runtime tasks to the UI thread
pub(crate) type Inbox<T> = Arc<Mutex<Vec<T>>>;

/// Decoded thumbnail for `url`, or why it could not be produced
pub(crate) type ThumbnailResult = (String, Result<egui::ColorImage, FetchError>);

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) gallery: Gallery,
    pub(crate) client: PicsumClient,
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) fetch_inbox: Inbox<FetchOutcome>,
    pub(crate) started: bool,
    // Thumbnail cache, keyed by download_url
    pub(crate) thumbnails: HashMap<String, ThumbnailState>,
    pub(crate) thumbnail_inbox: Inbox<ThumbnailResult>,
    pub(crate) thumbnail_permits: Arc<Semaphore>,
    pub(crate) thumbnail_size: u32,
    // Settings
    pub(crate) api_base_url: String,
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) data_dir: PathBuf,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        data_dir: PathBuf,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        // Force dark theme
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Add Phosphor icons font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("gallery-worker")
            .build()?;

        let base_url = settings.base_url();
        info!(base_url = %base_url, "Image service configured");

        Ok(Self {
            gallery: Gallery::new(),
            client: PicsumClient::new(base_url).inspect_err(|e| {
                error!(error = %e, "Failed to build HTTP client");
            })?,
            runtime,
            fetch_inbox: Arc::new(Mutex::new(Vec::new())),
            started: false,
            thumbnails: HashMap::new(),
            thumbnail_inbox: Arc::new(Mutex::new(Vec::new())),
            thumbnail_permits: Arc::new(Semaphore::new(crate::constants::THUMBNAIL_CONCURRENCY)),
            thumbnail_size: settings.thumbnail_size.max(1),
            api_base_url: settings.api_base_url.clone(),
            window_pos: settings.window_pos(),
            window_size: settings.window_size(),
            needs_center: settings.window_pos().is_none(),
            data_dir,
        })
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            api_base_url: self.api_base_url.clone(),
            thumbnail_size: self.thumbnail_size,
        };
        settings.save(&self.data_dir);
    }
}

/// Take everything queued so far, tolerating a poisoned lock.
pub(crate) fn drain<T>(inbox: &Inbox<T>) -> Vec<T> {
    std::mem::take(&mut *inbox.lock().unwrap_or_else(PoisonError::into_inner))
}

pub(crate) fn push<T>(inbox: &Inbox<T>, item: T) {
    inbox.lock().unwrap_or_else(PoisonError::into_inner).push(item);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_inbox_in_order() {
        let inbox: Inbox<u32> = Arc::new(Mutex::new(Vec::new()));
        push(&inbox, 1);
        push(&inbox, 2);
        assert_eq!(drain(&inbox), vec![1, 2]);
        assert!(drain(&inbox).is_empty());
    }
}
