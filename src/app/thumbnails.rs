//! Thumbnail loading

use super::{drain, push, App};
use crate::types::{FetchError, ImageRecord, ThumbnailState};
use eframe::egui;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Decode image bytes and shrink them so the longest edge is at most `max_edge`.
pub(crate) fn decode_thumbnail(bytes: &[u8], max_edge: u32) -> Result<egui::ColorImage, FetchError> {
    let img = image::load_from_memory(bytes).map_err(|e| FetchError::Image(e.to_string()))?;
    let img = if img.width() > max_edge || img.height() > max_edge {
        img.thumbnail(max_edge, max_edge)
    } else {
        img
    };
    let rgba = img.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, &rgba.into_raw()))
}

/// Drop cache entries whose URL is no longer listed.
pub(crate) fn retain_listed<T>(cache: &mut HashMap<String, T>, images: &[ImageRecord]) {
    let listed: HashSet<&str> = images.iter().map(|r| r.download_url.as_str()).collect();
    cache.retain(|url, _| listed.contains(url.as_str()));
}

/// Listed URLs with no cache entry yet, in display order and without repeats.
pub(crate) fn missing_urls<T>(cache: &HashMap<String, T>, images: &[ImageRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    images
        .iter()
        .map(|r| r.download_url.as_str())
        .filter(|url| !cache.contains_key(*url) && seen.insert(*url))
        .map(str::to_string)
        .collect()
}

/// Replace the entry for `url` only if it is still cached. Returns false when
/// the entry was pruned in the meantime and the result is discarded.
pub(crate) fn settle<T>(cache: &mut HashMap<String, T>, url: &str, make: impl FnOnce() -> T) -> bool {
    match cache.get_mut(url) {
        Some(entry) => {
            *entry = make();
            true
        }
        None => false,
    }
}

impl App {
    /// Start downloads for listed cards that have no thumbnail entry yet.
    pub fn ensure_thumbnails(&mut self, ctx: &egui::Context) {
        for url in missing_urls(&self.thumbnails, self.gallery.images()) {
            self.spawn_thumbnail(ctx, &url);
            self.thumbnails.insert(url, ThumbnailState::Loading);
        }
    }

    /// Release textures of cards no longer listed. Called after navigation.
    pub fn prune_thumbnails(&mut self) {
        let before = self.thumbnails.len();
        retain_listed(&mut self.thumbnails, self.gallery.images());
        debug!(dropped = before - self.thumbnails.len(), "Thumbnails pruned");
    }

    fn spawn_thumbnail(&self, ctx: &egui::Context, url: &str) {
        let client = self.client.clone();
        let permits = self.thumbnail_permits.clone();
        let inbox = self.thumbnail_inbox.clone();
        let max_edge = self.thumbnail_size;
        let url = url.to_string();
        let ctx = ctx.clone();

        self.runtime.spawn(async move {
            let result: Result<egui::ColorImage, FetchError> = async {
                // Permit covers both download and decode
                let _permit = permits.acquire().await.ok();
                let bytes = client.image_bytes(&url).await?;
                tokio::task::spawn_blocking(move || decode_thumbnail(&bytes, max_edge))
                    .await
                    .map_err(|e| FetchError::Image(e.to_string()))?
            }
            .await;
            push(&inbox, (url, result));
            ctx.request_repaint();
        });
    }

    /// Upload finished thumbnails as textures. Runs at the top of every frame.
    pub fn poll_thumbnails(&mut self, ctx: &egui::Context) {
        for (url, result) in drain(&self.thumbnail_inbox) {
            let settled = settle(&mut self.thumbnails, &url, || match result {
                Ok(image) => {
                    debug!(%url, size = ?image.size, "Thumbnail ready");
                    ThumbnailState::Ready(ctx.load_texture(
                        url.clone(),
                        image,
                        egui::TextureOptions::LINEAR,
                    ))
                }
                Err(e) => {
                    warn!(%url, error = %e, "Failed to load thumbnail");
                    ThumbnailState::Failed
                }
            });
            if !settled {
                debug!(%url, "Discarding thumbnail for a card no longer listed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, ImageFormat, Rgb};
    use std::io::Cursor;

    fn encode_png(width: u32, height: u32) -> Vec<u8> {
        let img = ImageBuffer::from_pixel(width, height, Rgb([200u8, 120, 40]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("png should encode");
        bytes
    }

    #[test]
    fn large_image_is_downscaled_keeping_aspect() {
        let image = decode_thumbnail(&encode_png(1000, 500), 200).expect("png should decode");
        assert_eq!(image.size, [200, 100]);
    }

    #[test]
    fn small_image_is_left_alone() {
        let image = decode_thumbnail(&encode_png(120, 80), 200).expect("png should decode");
        assert_eq!(image.size, [120, 80]);
        assert_eq!(image.pixels[0], egui::Color32::from_rgb(200, 120, 40));
    }

    #[test]
    fn garbage_bytes_are_an_image_error() {
        let err = decode_thumbnail(b"<html>not an image</html>", 200).expect_err("should fail");
        assert!(matches!(err, FetchError::Image(_)));
    }

    fn record(url: &str) -> ImageRecord {
        ImageRecord {
            download_url: url.to_string(),
            author: "A".into(),
            id: None,
            width: None,
            height: None,
            url: None,
        }
    }

    #[test]
    fn navigation_prunes_unlisted_entries() {
        let mut cache: HashMap<String, u32> = HashMap::new();
        cache.insert("https://x/1".into(), 1);
        cache.insert("https://x/2".into(), 2);

        retain_listed(&mut cache, &[record("https://x/2")]);
        assert_eq!(cache.len(), 1);
        assert!(cache.contains_key("https://x/2"));

        retain_listed(&mut cache, &[]);
        assert!(cache.is_empty());
    }

    #[test]
    fn missing_urls_skips_cached_and_repeated() {
        let mut cache: HashMap<String, u32> = HashMap::new();
        cache.insert("https://x/1".into(), 1);
        let images = [
            record("https://x/1"),
            record("https://x/2"),
            record("https://x/3"),
            record("https://x/2"),
        ];
        assert_eq!(missing_urls(&cache, &images), vec!["https://x/2", "https://x/3"]);
    }

    #[test]
    fn result_for_pruned_entry_is_discarded() {
        let mut cache: HashMap<String, u32> = HashMap::new();
        cache.insert("https://x/1".into(), 0);

        assert!(settle(&mut cache, "https://x/1", || 7));
        assert_eq!(cache["https://x/1"], 7);

        let mut built = false;
        assert!(!settle(&mut cache, "https://x/gone", || {
            built = true;
            9
        }));
        assert!(!built);
        assert!(!cache.contains_key("https://x/gone"));
    }
}
