// Profile normalization: maps the loosely-shaped user-detail document onto
// a flat ProfileRecord. Every field is looked up along a fixed list of
// candidate paths; the first JavaScript-truthy candidate wins, since that is
// how the upstream page data treats presence (`0`, `false` and `""` count as
// missing).

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, Utc};
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::types::{MediaItem, MediaSource, ProfileRecord};

const CATEGORY_PREFIX: &str = "public-profile-category-v3-";

/// Largest instant a JavaScript `Date` can hold, in milliseconds.
const MAX_TIME_MS: f64 = 8.64e15;

static RE_TITLE_HANDLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(@([^)]*)\)").expect("valid regex"));

// ---------------------------------------------------------------------------
// Value helpers
// ---------------------------------------------------------------------------

/// JavaScript truthiness of a JSON value.
pub fn js_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// JavaScript `Number(value)` coercion. Arrays and objects become NaN.
pub fn js_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => parse_numeric_string(s),
        Value::Array(_) | Value::Object(_) => f64::NAN,
    }
}

fn parse_numeric_string(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            if digits.starts_with(['+', '-']) {
                return f64::NAN;
            }
            return u64::from_str_radix(digits, radix)
                .map(|n| n as f64)
                .unwrap_or(f64::NAN);
        }
    }
    // Rust also accepts "inf", "nan" and "infinity"; JavaScript does not.
    if s.bytes().any(|b| b.is_ascii_alphabetic() && b != b'e' && b != b'E') {
        return f64::NAN;
    }
    s.parse().unwrap_or(f64::NAN)
}

fn path<'a>(root: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().try_fold(root, |node, key| node.get(*key))
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| js_truthy(v))
}

fn first_present<'a, const N: usize>(candidates: [Option<&'a Value>; N]) -> Option<&'a Value> {
    candidates.into_iter().find_map(present)
}

/// Scalar JSON value as display text. Objects and arrays have no text form.
fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_text(n)),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// JavaScript `String(n)`: "1" for 1.0, exponent form outside [1e-6, 1e21).
fn number_text(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    let f = n.as_f64().unwrap_or(f64::NAN);
    let abs = f.abs();
    if f == 0.0 || (1e-6..1e21).contains(&abs) {
        return format!("{f}");
    }
    let exp = format!("{f:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exp,
    }
}

fn text_of<const N: usize>(candidates: [Option<&Value>; N]) -> Option<String> {
    first_present(candidates).and_then(text)
}

fn flag(value: Option<&Value>) -> Option<bool> {
    match value? {
        Value::Null => None,
        Value::Bool(b) => Some(*b),
        other => Some(js_truthy(other)),
    }
}

// ---------------------------------------------------------------------------
// Scalar extractors
// ---------------------------------------------------------------------------

/// Turn a machine category id into a readable label.
/// "public-profile-category-v3-arts-and-culture" → "arts and culture"
pub fn clean_category(id: Option<&str>) -> Option<String> {
    let id = id.filter(|id| !id.is_empty())?;
    let stripped = id.strip_prefix(CATEGORY_PREFIX).unwrap_or(id);
    Some(stripped.replace('-', " "))
}

/// Convert a `{ "value": <epoch ms> }` wrapper into an ISO-8601 string.
pub fn iso_from_ms_wrapper(wrapper: Option<&Value>) -> Option<String> {
    let value = wrapper?.get("value").filter(|v| !v.is_null())?;
    iso_from_millis(js_number(value))
}

/// Format epoch milliseconds the way `Date.prototype.toISOString` does.
fn iso_from_millis(ms: f64) -> Option<String> {
    if !ms.is_finite() || ms.abs() > MAX_TIME_MS {
        return None;
    }
    let ms = ms.trunc() as i64;
    let Some(instant) = DateTime::<Utc>::from_timestamp_millis(ms) else {
        return Some(iso_beyond_chrono(ms));
    };
    let rest = instant.format("%m-%dT%H:%M:%S%.3fZ").to_string();
    Some(with_year(i64::from(instant.year()), &rest))
}

fn with_year(year: i64, rest: &str) -> String {
    if (0..=9999).contains(&year) {
        format!("{year:04}-{rest}")
    } else {
        let sign = if year < 0 { '-' } else { '+' };
        format!("{sign}{:06}-{rest}", year.unsigned_abs())
    }
}

/// The outer years of the `Date` range (|year| > 262143) that chrono cannot
/// represent, computed from the day count.
fn iso_beyond_chrono(ms: i64) -> String {
    const MS_PER_DAY: i64 = 86_400_000;
    let days = ms.div_euclid(MS_PER_DAY);
    let of_day = ms.rem_euclid(MS_PER_DAY);
    let (year, month, day) = civil_from_days(days);
    let rest = format!(
        "{month:02}-{day:02}T{:02}:{:02}:{:02}.{:03}Z",
        of_day / 3_600_000,
        of_day / 60_000 % 60,
        of_day / 1000 % 60,
        of_day % 1000
    );
    with_year(year, &rest)
}

/// Proleptic Gregorian (year, month, day) for days since 1970-01-01.
fn civil_from_days(days: i64) -> (i64, i64, i64) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

/// Render a subscriber count for display: numbers in de-DE grouping
/// ("12.345", "1.234,5"), anything non-numeric as its own text.
pub fn format_subscriber_count(raw: &Value) -> String {
    let n = js_number(raw);
    if n.is_finite() {
        format_grouped_de(n)
    } else {
        match raw {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

fn format_grouped_de(n: f64) -> String {
    let fixed = round_half_expand_3(n.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    if n < 0.0 {
        out.push('-');
    }
    let len = int_part.len();
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(digit);
    }
    if !frac_part.is_empty() {
        out.push(',');
        out.push_str(frac_part);
    }
    out
}

/// Round to three fraction digits, ties away from zero, working on the
/// shortest decimal form of `n` (non-negative). Returns "int.fff".
fn round_half_expand_3(n: f64) -> String {
    let shortest = format!("{n}");
    let (int_part, frac_part) = shortest.split_once('.').unwrap_or((shortest.as_str(), ""));

    let mut digits: Vec<u8> = int_part.bytes().collect();
    let kept = frac_part.len().min(3);
    digits.extend(frac_part.bytes().take(kept));
    digits.extend(std::iter::repeat(b'0').take(3 - kept));

    if frac_part.as_bytes().get(3).is_some_and(|d| *d >= b'5') {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let split = digits.len() - 3;
    let digits = String::from_utf8_lossy(&digits);
    format!("{}.{}", &digits[..split], &digits[split..])
}

// ---------------------------------------------------------------------------
// Media collector
// ---------------------------------------------------------------------------

/// Flatten `[{ storyTitle, storyId, snapList: [snap, ..] }, ..]` into media
/// items, in story order then snap order. Snaps without URLs are kept.
pub fn collect_media(stories: Option<&Value>, source: MediaSource) -> Vec<MediaItem> {
    let Some(stories) = stories.and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut media = Vec::new();
    for story in stories {
        let story_title = text_of([path(story, &["storyTitle", "value"])]);
        let story_id = text_of([path(story, &["storyId", "value"])]);
        let snaps = story
            .get("snapList")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        for snap in snaps {
            media.push(media_item(snap, source, &story_title, &story_id));
        }
    }
    media
}

fn media_item(
    snap: &Value,
    source: MediaSource,
    story_title: &Option<String>,
    story_id: &Option<String>,
) -> MediaItem {
    let preview = text_of([path(snap, &["snapUrls", "mediaPreviewUrl", "value"])]);
    let media_url = text_of([path(snap, &["snapUrls", "mediaUrl"])]).or_else(|| preview.clone());
    let preview_url = preview.or_else(|| media_url.clone());

    MediaItem {
        source,
        story_title: story_title.clone(),
        story_id: story_id.clone(),
        snap_index: snap.get("snapIndex").and_then(Value::as_i64),
        media_url,
        preview_url,
        timestamp_iso: snap_timestamp(snap),
        lat: snap.get("lat").and_then(Value::as_f64),
        lng: snap.get("lng").and_then(Value::as_f64),
    }
}

/// `timestampInSec.value` is in seconds. Zero reads as missing.
fn snap_timestamp(snap: &Value) -> Option<String> {
    let raw = present(path(snap, &["timestampInSec", "value"]))?;
    let seconds = js_number(raw);
    if seconds == 0.0 || !seconds.is_finite() {
        return None;
    }
    iso_from_millis(seconds * 1000.0)
}

// ---------------------------------------------------------------------------
// Profile normalizer
// ---------------------------------------------------------------------------

/// Build a ProfileRecord from a full user-detail response.
/// Returns None when the document has no `data.props.pageProps` container or
/// no user object under `userProfile.userInfo` / `userProfile.publicProfileInfo`.
pub fn extract_profile(doc: &Value) -> Option<ProfileRecord> {
    let Some(page_props) = present(path(doc, &["data", "props", "pageProps"])) else {
        debug!("no data.props.pageProps in response");
        return None;
    };

    let Some(user) = first_present([
        path(page_props, &["userProfile", "userInfo"]),
        path(page_props, &["userProfile", "publicProfileInfo"]),
    ]) else {
        debug!("no userInfo or publicProfileInfo in pageProps.userProfile");
        return None;
    };

    let username = text_of([user.get("username")]).or_else(|| username_from_title(page_props));

    let subscriber_count_raw = present(user.get("subscriberCount")).cloned();
    let subscriber_count = subscriber_count_raw.as_ref().map(format_subscriber_count);

    let mut media = collect_media(page_props.get("curatedHighlights"), MediaSource::Highlight);
    media.extend(collect_media(
        page_props.get("spotlightHighlights"),
        MediaSource::Spotlight,
    ));

    debug!(
        username = username.as_deref().unwrap_or("<unknown>"),
        media = media.len(),
        "profile extracted"
    );

    Some(ProfileRecord {
        username,
        display_name: text_of([user.get("displayName"), user.get("title")]),
        snapcode: text_of([
            user.get("snapcodeImageUrl"),
            path(page_props, &["pageLinks", "snapcodeImageUrl"]),
        ]),
        avatar: text_of([
            user.get("profilePictureUrl"),
            path(user, &["bitmoji3d", "avatarImage", "url"]),
        ]),
        avatar_fallback: text_of([path(user, &["bitmoji3d", "avatarImage", "fallbackUrl"])]),
        cover: text_of([
            user.get("squareHeroImageUrl"),
            path(page_props, &["linkPreview", "twitterImage", "url"]),
        ]),
        profile_url: text_of([
            path(page_props, &["pageLinks", "snapchatCanonicalUrl"]),
            path(page_props, &["pageLinks", "canonicalUrl"]),
        ]),
        bio: text_of([user.get("bio")]),
        website: text_of([user.get("websiteUrl")]),
        address: text_of([user.get("address")]),
        subscriber_count,
        subscriber_count_raw,
        category_id: text_of([user.get("categoryStringId")]),
        subcategory_id: text_of([user.get("subcategoryStringId")]),
        created_at: iso_from_ms_wrapper(present(user.get("creationTimestampMs"))),
        last_update_at: iso_from_ms_wrapper(present(user.get("lastUpdateTimestampMs"))),
        has_story: flag(user.get("hasStory")),
        has_curated_highlights: flag(user.get("hasCuratedHighlights")),
        has_spotlight_highlights: flag(user.get("hasSpotlightHighlights")),
        meta_description: text_of([path(page_props, &["pageMetadata", "pageDescription", "value"])]),
        media,
    })
}

/// "Celine (@cheyenne123.4) | Snapchat" → "cheyenne123.4"
fn username_from_title(page_props: &Value) -> Option<String> {
    let title = present(path(page_props, &["pageMetadata", "pageTitle"]))?.as_str()?;
    let caps = RE_TITLE_HANDLE.captures(title)?;
    caps.get(1)
        .map(|m| m.as_str().to_string())
        .filter(|handle| !handle.is_empty())
}
