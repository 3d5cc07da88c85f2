//! Common types and data structures

use std::fmt;

/// One entry of the remote `/v2/list` array.
///
/// Only `download_url` and `author` are required; the rest is kept when the
/// remote sends it and ignored otherwise.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct ImageRecord {
    pub download_url: String,
    pub author: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    /// Photo page on the source site
    #[serde(default)]
    pub url: Option<String>,
}

impl ImageRecord {
    /// Page to open in the browser: the source page if known, else the raw image.
    pub fn browse_url(&self) -> &str {
        self.url.as_deref().unwrap_or(&self.download_url)
    }
}

/// Parameters of one listing fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub page: u32,
    pub limit: u32,
    /// Navigation count when the request was issued; not sent to the remote
    pub generation: u64,
}

/// Result of a listing fetch, handed back to the UI thread
#[derive(Debug)]
pub struct FetchOutcome {
    pub request: FetchRequest,
    pub result: Result<Vec<ImageRecord>, FetchError>,
}

/// Everything that can go wrong talking to the image service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Connection, TLS or body read failure
    Transport(String),
    /// Non-2xx response
    Status(u16),
    /// Body was not the expected JSON
    Decode(String),
    /// Downloaded bytes were not a decodable image
    Image(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "request failed: {e}"),
            Self::Status(code) => write!(f, "HTTP {code}"),
            Self::Decode(e) => write!(f, "malformed response: {e}"),
            Self::Image(e) => write!(f, "image decode failed: {e}"),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            Self::Status(status.as_u16())
        } else {
            Self::Transport(e.to_string())
        }
    }
}

/// Load state of one card's thumbnail
pub enum ThumbnailState {
    Loading,
    Ready(egui::TextureHandle),
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_parses_full_listing_entry() {
        let json = r#"{
            "id": "0",
            "author": "Alejandro Escamilla",
            "width": 5000,
            "height": 3333,
            "url": "https://unsplash.com/photos/yC-Yzbqy7PY",
            "download_url": "https://picsum.photos/id/0/5000/3333"
        }"#;
        let record: ImageRecord = serde_json::from_str(json).expect("entry should parse");
        assert_eq!(record.author, "Alejandro Escamilla");
        assert_eq!(record.id.as_deref(), Some("0"));
        assert_eq!(record.width, Some(5000));
        assert_eq!(record.browse_url(), "https://unsplash.com/photos/yC-Yzbqy7PY");
    }

    #[test]
    fn record_needs_only_url_and_author() {
        let json = r#"{"download_url": "https://x/1.jpg", "author": "A", "extra": true}"#;
        let record: ImageRecord = serde_json::from_str(json).expect("entry should parse");
        assert_eq!(record.url, None);
        assert_eq!(record.browse_url(), "https://x/1.jpg");
    }

    #[test]
    fn record_without_author_is_rejected() {
        let json = r#"{"download_url": "https://x/1.jpg"}"#;
        assert!(serde_json::from_str::<ImageRecord>(json).is_err());
    }

    #[test]
    fn fetch_error_display() {
        assert_eq!(FetchError::Status(503).to_string(), "HTTP 503");
        assert_eq!(
            FetchError::Decode("eof".into()).to_string(),
            "malformed response: eof"
        );
    }
}
