use std::fmt::Write;

use crate::display::{DisplaySlots, ImageSlot, LinkSlot, MediaSlot, NO_MEDIA, PLACEHOLDER};

/// Render the display slots as labelled terminal lines.
pub fn render_text(slots: &DisplaySlots, include_raw: bool) -> String {
    let mut out = String::new();

    line(&mut out, "Username", &slots.username);
    line(&mut out, "Anzeigename", &slots.display_name);
    line(&mut out, "Snapcode", &image(slots.snapcode.as_ref()));
    line(&mut out, "Profilbild", &image(slots.avatar.as_ref()));
    line(&mut out, "Titelbild", &image(slots.cover.as_ref()));
    line(&mut out, "Profil-Link", &link(slots.profile_link.as_ref()));
    line(&mut out, "Bio", &slots.bio);
    line(&mut out, "Website", &link(slots.website.as_ref()));
    line(&mut out, "Adresse", &slots.address);
    line(&mut out, "Kategorie", &slots.category);
    line(&mut out, "Unterkategorie", &slots.subcategory);
    line(&mut out, "Abonnenten", &slots.subscribers);
    line(&mut out, "Erstellt", &slots.created);
    line(&mut out, "Aktualisiert", &slots.last_update);
    line(&mut out, "Story", &slots.has_story);
    line(&mut out, "Highlights", &slots.has_curated);
    line(&mut out, "Spotlight", &slots.has_spotlight);
    line(&mut out, "Meta", &slots.meta);

    match &slots.media {
        MediaSlot::Empty => {}
        MediaSlot::NoneFound => line(&mut out, "Medien", NO_MEDIA),
        MediaSlot::Entries(entries) => {
            line(&mut out, "Medien", &entries.len().to_string());
            for entry in entries {
                let _ = writeln!(out, "  - {}", entry.meta);
                let _ = writeln!(out, "    Vorschau: {} ({})", entry.thumbnail, entry.alt);
                let _ = writeln!(out, "    Öffnen:   {}", entry.open_url);
                if let Some(download) = &entry.download {
                    let _ = writeln!(out, "    Download: {} -> {}", download.href, download.file_name);
                }
            }
        }
    }

    if include_raw {
        let _ = writeln!(out, "\nRohantwort:\n{}", slots.raw);
    }
    out
}

fn line(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "{:<16}{}", format!("{label}:"), value);
}

fn image(slot: Option<&ImageSlot>) -> String {
    match slot {
        Some(ImageSlot {
            src,
            fallback: Some(fallback),
            ..
        }) if fallback != src => format!("{src} (Fallback: {fallback})"),
        Some(slot) => slot.src.clone(),
        None => PLACEHOLDER.to_string(),
    }
}

fn link(slot: Option<&LinkSlot>) -> String {
    match slot {
        Some(LinkSlot { href, text }) if href != text => format!("{text} <{href}>"),
        Some(slot) => slot.href.clone(),
        None => PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{DownloadLink, MediaEntry};

    #[test]
    fn pending_slots_render_placeholders() {
        let text = render_text(&DisplaySlots::pending("alice"), false);
        assert!(text.starts_with("Username:       alice\n"));
        assert!(text.contains("Bio:            –\n"));
        assert!(!text.contains("Medien"));
        assert!(!text.contains("Rohantwort"));
    }

    #[test]
    fn media_and_raw_rendered() {
        let mut slots = DisplaySlots::pending("alice");
        slots.website = Some(LinkSlot {
            href: "https://celine.art".into(),
            text: "celine.art".into(),
        });
        slots.media = MediaSlot::Entries(vec![MediaEntry {
            thumbnail: "https://p/1.jpg".into(),
            alt: "Trip #0".into(),
            meta: "Highlight | Trip".into(),
            open_url: "https://m/1.mp4".into(),
            download: Some(DownloadLink {
                href: "https://m/1.mp4".into(),
                file_name: "alice-1".into(),
            }),
        }]);
        slots.raw = "{\"ok\":true}".into();

        let text = render_text(&slots, true);
        assert!(text.contains("Website:        celine.art <https://celine.art>\n"));
        assert!(text.contains("Medien:         1\n"));
        assert!(text.contains("  - Highlight | Trip\n"));
        assert!(text.contains("    Download: https://m/1.mp4 -> alice-1\n"));
        assert!(text.ends_with("Rohantwort:\n{\"ok\":true}\n"));
    }

    #[test]
    fn no_media_message() {
        let mut slots = DisplaySlots::pending("alice");
        slots.media = MediaSlot::NoneFound;
        assert!(render_text(&slots, false).contains(NO_MEDIA));
    }
}
