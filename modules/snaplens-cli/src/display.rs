//! Display slots: the fixed set of named outputs a lookup is painted into.
//!
//! Every slot starts as the placeholder and is overwritten from the lookup
//! outcome. Error outcomes only touch the display-name and raw slots.

use serde_json::Value;
use snaplens_common::{clean_category, MediaItem, ProfileRecord};

use crate::lookup::{Lookup, LookupOutcome};

/// Shown in every text slot that has no value.
pub const PLACEHOLDER: &str = "–";

pub const NO_PROFILE: &str = "Kein Profil gefunden";
pub const REQUEST_FAILED: &str = "Fehler bei Anfrage";
pub const NO_MEDIA: &str = "Keine Medien in Highlights/Spotlight gefunden.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSlot {
    pub src: String,
    /// Loaded instead of `src` when `src` fails.
    pub fallback: Option<String>,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSlot {
    pub href: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    pub href: String,
    pub file_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaEntry {
    pub thumbnail: String,
    pub alt: String,
    /// "Highlight | Studio | 2023-11-14T19:26:40.000Z"
    pub meta: String,
    pub open_url: String,
    pub download: Option<DownloadLink>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSlot {
    /// Nothing painted yet (pending or error).
    Empty,
    /// The profile has no media at all.
    NoneFound,
    Entries(Vec<MediaEntry>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySlots {
    pub username: String,
    pub display_name: String,
    pub snapcode: Option<ImageSlot>,
    pub avatar: Option<ImageSlot>,
    pub cover: Option<ImageSlot>,
    pub profile_link: Option<LinkSlot>,
    pub bio: String,
    pub website: Option<LinkSlot>,
    pub address: String,
    pub category: String,
    pub subcategory: String,
    pub subscribers: String,
    pub created: String,
    pub last_update: String,
    pub has_story: String,
    pub has_curated: String,
    pub has_spotlight: String,
    pub meta: String,
    pub media: MediaSlot,
    pub raw: String,
}

impl DisplaySlots {
    /// Slots as shown while the request is in flight.
    pub fn pending(handle: &str) -> Self {
        Self {
            username: handle.to_string(),
            display_name: PLACEHOLDER.to_string(),
            snapcode: None,
            avatar: None,
            cover: None,
            profile_link: None,
            bio: PLACEHOLDER.to_string(),
            website: None,
            address: PLACEHOLDER.to_string(),
            category: PLACEHOLDER.to_string(),
            subcategory: PLACEHOLDER.to_string(),
            subscribers: PLACEHOLDER.to_string(),
            created: PLACEHOLDER.to_string(),
            last_update: PLACEHOLDER.to_string(),
            has_story: PLACEHOLDER.to_string(),
            has_curated: PLACEHOLDER.to_string(),
            has_spotlight: PLACEHOLDER.to_string(),
            meta: PLACEHOLDER.to_string(),
            media: MediaSlot::Empty,
            raw: String::new(),
        }
    }

    pub fn from_lookup(handle: &str, lookup: &Lookup) -> Self {
        let mut slots = Self::pending(handle);
        slots.raw = lookup.raw.clone();

        match &lookup.outcome {
            LookupOutcome::HttpError { status } => {
                slots.display_name = format!("Fehler: HTTP {status}");
            }
            LookupOutcome::NoProfile => {
                slots.display_name = NO_PROFILE.to_string();
            }
            LookupOutcome::RequestFailed(_) => {
                slots.display_name = REQUEST_FAILED.to_string();
            }
            LookupOutcome::Found(profile) => slots.fill(handle, profile),
        }
        slots
    }

    fn fill(&mut self, handle: &str, p: &ProfileRecord) {
        self.username = non_empty(p.username.as_deref()).unwrap_or(handle).to_string();
        self.display_name = or_placeholder(p.display_name.as_deref());
        self.bio = or_placeholder(p.bio.as_deref());
        self.website = non_empty(p.website.as_deref()).map(|site| LinkSlot {
            href: website_href(site),
            text: site.to_string(),
        });
        self.address = or_placeholder(p.address.as_deref());
        self.category = or_placeholder(clean_category(p.category_id.as_deref()).as_deref());
        self.subcategory = or_placeholder(clean_category(p.subcategory_id.as_deref()).as_deref());
        self.subscribers = subscribers_text(p);
        self.created = or_placeholder(p.created_at.as_deref());
        self.last_update = or_placeholder(p.last_update_at.as_deref());
        self.has_story = format_bool_flag(p.has_story).to_string();
        self.has_curated = format_bool_flag(p.has_curated_highlights).to_string();
        self.has_spotlight = format_bool_flag(p.has_spotlight_highlights).to_string();
        self.meta = or_placeholder(p.meta_description.as_deref());

        self.snapcode = non_empty(p.snapcode.as_deref()).map(|src| ImageSlot {
            src: src.to_string(),
            fallback: None,
            alt: "Snapcode".to_string(),
        });
        let fallback = non_empty(p.avatar_fallback.as_deref());
        self.avatar = non_empty(p.avatar.as_deref())
            .or(fallback)
            .map(|src| ImageSlot {
                src: src.to_string(),
                fallback: fallback.map(str::to_string),
                alt: "Profilbild".to_string(),
            });
        self.cover = non_empty(p.cover.as_deref()).map(|src| ImageSlot {
            src: src.to_string(),
            fallback: None,
            alt: "Titelbild".to_string(),
        });
        self.profile_link = non_empty(p.profile_url.as_deref()).map(|url| LinkSlot {
            href: url.to_string(),
            text: url.to_string(),
        });

        self.media = if p.media.is_empty() {
            MediaSlot::NoneFound
        } else {
            MediaSlot::Entries(media_entries(p))
        };
    }
}

/// "ja" / "nein", or the placeholder when the flag is unknown.
pub fn format_bool_flag(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "ja",
        Some(false) => "nein",
        None => PLACEHOLDER,
    }
}

/// Website values often come without a scheme ("celine.art").
pub fn website_href(site: &str) -> String {
    let lower = site.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        site.to_string()
    } else {
        format!("https://{site}")
    }
}

fn subscribers_text(p: &ProfileRecord) -> String {
    if let Some(formatted) = non_empty(p.subscriber_count.as_deref()) {
        return formatted.to_string();
    }
    match &p.subscriber_count_raw {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

/// Entries for every item with a URL. Download names count over the full
/// list, so skipped items still use up an index.
fn media_entries(p: &ProfileRecord) -> Vec<MediaEntry> {
    let base_name = non_empty(p.username.as_deref()).unwrap_or("snap");

    p.media
        .iter()
        .enumerate()
        .filter_map(|(idx, item)| media_entry(item, idx, base_name))
        .collect()
}

fn media_entry(item: &MediaItem, idx: usize, base_name: &str) -> Option<MediaEntry> {
    let media_url = non_empty(item.media_url.as_deref());
    let preview_url = non_empty(item.preview_url.as_deref());
    let thumbnail = preview_url.or(media_url)?;
    let open_url = media_url.or(preview_url)?;

    let number = item
        .snap_index
        .map(|i| i.to_string())
        .unwrap_or_else(|| idx.to_string());
    let alt = format!("{} #{number}", item.story_title.as_deref().unwrap_or(""));

    let mut parts = vec![item.source.label()];
    parts.extend(non_empty(item.story_title.as_deref()));
    parts.extend(non_empty(item.timestamp_iso.as_deref()));

    Some(MediaEntry {
        thumbnail: thumbnail.to_string(),
        alt,
        meta: parts.join(" | "),
        open_url: open_url.to_string(),
        download: media_url.map(|href| DownloadLink {
            href: href.to_string(),
            file_name: format!("{base_name}-{}", idx + 1),
        }),
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn or_placeholder(value: Option<&str>) -> String {
    non_empty(value).unwrap_or(PLACEHOLDER).to_string()
}
