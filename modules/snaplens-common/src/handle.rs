// Input normalization: turn whatever the user typed ("@name", "name",
// "https://www.snapchat.com/add/name") into the bare username the API wants.

use url::Url;

/// Normalize a raw username-or-URL input. Returns None when nothing usable
/// is left (blank input, a lone "@").
///
/// "@cheyenne123.4" → "cheyenne123.4"
/// "https://www.snapchat.com/add/cheyenne123.4" → "cheyenne123.4"
pub fn normalize_handle(raw: &str) -> Option<String> {
    extract_handle(raw).filter(|h| !h.is_empty())
}

fn extract_handle(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let handle = trimmed.strip_prefix('@').unwrap_or(trimmed);

    // Not a URL: the input already is the handle.
    let Ok(url) = Url::parse(handle) else {
        return Some(handle.to_string());
    };

    match last_path_segment(&url) {
        Some(last) => {
            let last = last.strip_prefix('@').unwrap_or(last);
            Some(last.strip_prefix("add/").unwrap_or(last).to_string())
        }
        None => Some(handle.to_string()),
    }
}

fn last_path_segment(url: &Url) -> Option<&str> {
    url.path().split('/').filter(|s| !s.is_empty()).last()
}
