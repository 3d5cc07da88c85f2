//! Application constants and configuration

pub const APP_NAME: &str = "Picsum Gallery";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const USER_AGENT: &str = concat!("picsum-gallery/", env!("CARGO_PKG_VERSION"));

pub const DEFAULT_BASE_URL: &str = "https://picsum.photos";
/// Overrides `api_base_url` from settings when set
pub const BASE_URL_ENV: &str = "PICSUM_BASE_URL";

/// Batch size requested on start and after navigation until "Load More" changes it
pub const INITIAL_BATCH: u32 = 8;
/// Batch size chosen by the first "Load More" (when the batch is still `INITIAL_BATCH`)
pub const FIRST_LOAD_MORE_BATCH: u32 = 12;
/// Batch size chosen by every later "Load More"
pub const LATER_LOAD_MORE_BATCH: u32 = 10;

/// Concurrent thumbnail downloads
pub const THUMBNAIL_CONCURRENCY: usize = 8;
/// Longest edge (px) a decoded photo is downscaled to before becoming a texture
pub const DEFAULT_THUMBNAIL_SIZE: u32 = 640;
