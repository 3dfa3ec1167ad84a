use schemars::JsonSchema;
use serde::Serialize;
use serde_json::Value;

// --- Media ---

/// Which upstream collection a media item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
pub enum MediaSource {
    Highlight,
    Spotlight,
}

impl MediaSource {
    pub fn label(self) -> &'static str {
        match self {
            MediaSource::Highlight => "Highlight",
            MediaSource::Spotlight => "Spotlight",
        }
    }
}

/// One snap from a highlight or spotlight story, flattened.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub source: MediaSource,
    pub story_title: Option<String>,
    pub story_id: Option<String>,
    pub snap_index: Option<i64>,
    pub media_url: Option<String>,
    pub preview_url: Option<String>,
    pub timestamp_iso: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl MediaItem {
    /// Items without any URL are kept by the collector but cannot be shown.
    pub fn has_url(&self) -> bool {
        self.media_url.is_some() || self.preview_url.is_some()
    }
}

// --- Profile ---

/// Flat profile record built from a user-detail response.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub snapcode: Option<String>,
    pub avatar: Option<String>,
    pub avatar_fallback: Option<String>,
    pub cover: Option<String>,
    pub profile_url: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    /// de-DE grouped form of `subscriber_count_raw`, or the raw value as text.
    pub subscriber_count: Option<String>,
    /// Passed through untouched; upstream sends either a number or a string.
    pub subscriber_count_raw: Option<Value>,
    pub category_id: Option<String>,
    pub subcategory_id: Option<String>,
    pub created_at: Option<String>,
    pub last_update_at: Option<String>,
    pub has_story: Option<bool>,
    pub has_curated_highlights: Option<bool>,
    pub has_spotlight_highlights: Option<bool>,
    pub meta_description: Option<String>,
    pub media: Vec<MediaItem>,
}
