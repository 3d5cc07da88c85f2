//! User settings stored as settings.json in the app data directory

use crate::constants::{BASE_URL_ENV, DEFAULT_BASE_URL, DEFAULT_THUMBNAIL_SIZE};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    // Image service
    pub api_base_url: String,

    // Longest edge of decoded thumbnails
    pub thumbnail_size: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
            api_base_url: DEFAULT_BASE_URL.to_string(),
            thumbnail_size: DEFAULT_THUMBNAIL_SIZE,
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("settings.json");
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join("settings.json");
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }

    /// Base URL of the image service, `PICSUM_BASE_URL` taking precedence.
    pub fn base_url(&self) -> String {
        self.base_url_with_override(std::env::var(BASE_URL_ENV).ok())
    }

    fn base_url_with_override(&self, env_value: Option<String>) -> String {
        match env_value {
            Some(url) if !url.trim().is_empty() => url.trim().to_string(),
            _ if self.api_base_url.trim().is_empty() => DEFAULT_BASE_URL.to_string(),
            _ => self.api_base_url.clone(),
        }
    }

    pub fn window_pos(&self) -> Option<egui::Pos2> {
        match (self.window_x, self.window_y) {
            (Some(x), Some(y)) => Some(egui::pos2(x, y)),
            _ => None,
        }
    }

    pub fn window_size(&self) -> Option<egui::Vec2> {
        match (self.window_w, self.window_h) {
            (Some(w), Some(h)) => Some(egui::vec2(w, h)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().expect("tempdir should be created");
        let settings = Settings::load(dir.path());
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.api_base_url, "https://picsum.photos");
    }

    #[test]
    fn save_then_load_keeps_values() {
        let dir = TempDir::new().expect("tempdir should be created");
        let settings = Settings {
            window_x: Some(10.0),
            window_y: Some(20.0),
            window_w: Some(1200.0),
            window_h: Some(800.0),
            api_base_url: "http://localhost:8080".into(),
            thumbnail_size: 320,
        };
        settings.save(dir.path());

        let loaded = Settings::load(dir.path());
        assert_eq!(loaded, settings);
        assert_eq!(loaded.window_pos(), Some(egui::pos2(10.0, 20.0)));
        assert_eq!(loaded.window_size(), Some(egui::vec2(1200.0, 800.0)));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = TempDir::new().expect("tempdir should be created");
        std::fs::write(dir.path().join("settings.json"), r#"{"thumbnail_size": 256}"#)
            .expect("file should be written");

        let loaded = Settings::load(dir.path());
        assert_eq!(loaded.thumbnail_size, 256);
        assert_eq!(loaded.api_base_url, DEFAULT_BASE_URL);
        assert_eq!(loaded.window_pos(), None);
    }

    #[test]
    fn malformed_file_gives_defaults() {
        let dir = TempDir::new().expect("tempdir should be created");
        std::fs::write(dir.path().join("settings.json"), "not json")
            .expect("file should be written");
        assert_eq!(Settings::load(dir.path()), Settings::default());
    }

    #[test]
    fn env_override_wins_over_file() {
        let settings = Settings {
            api_base_url: "http://from-file".into(),
            ..Settings::default()
        };
        assert_eq!(
            settings.base_url_with_override(Some(" http://from-env ".into())),
            "http://from-env"
        );
        assert_eq!(settings.base_url_with_override(Some(String::new())), "http://from-file");
        assert_eq!(settings.base_url_with_override(None), "http://from-file");
    }

    #[test]
    fn blank_base_url_falls_back_to_default() {
        let settings = Settings {
            api_base_url: "  ".into(),
            ..Settings::default()
        };
        assert_eq!(settings.base_url_with_override(None), DEFAULT_BASE_URL);
    }
}
