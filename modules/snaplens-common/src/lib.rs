pub mod config;
pub mod error;
pub mod handle;
pub mod normalize;
pub mod types;

pub use config::Config;
pub use error::{Result, SnapLensError};
pub use handle::normalize_handle;
pub use normalize::{
    clean_category, collect_media, extract_profile, format_subscriber_count,
    iso_from_ms_wrapper,
};
pub use types::{MediaItem, MediaSource, ProfileRecord};
