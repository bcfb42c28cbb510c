//! Keyword policy and thumbnail derivation for search results

use crate::types::{RawVideo, Video};

pub const ALLOWED_KEYWORDS: &[&str] = &[
    "learn", "tutorial", "course", "lesson", "study", "education",
    "training", "guide", "basics", "introduction", "class", "explained",
];

pub const EXCLUDED_KEYWORDS: &[&str] = &[
    "trailer", "movie", "music", "song", "funny", "dance",
    "prank", "entertainment", "film", "video clip",
];

pub const PLACEHOLDER_THUMBNAIL: &str = "https://via.placeholder.com/320x180?text=No+Thumbnail";

// (marker, terminator) pairs, tried in order
const ID_PATTERNS: &[(&str, char)] = &[("v=", '&'), ("youtu.be/", '?'), ("/shorts/", '?')];

/// Excluded keywords always win; otherwise at least one allowed keyword is required.
pub fn passes(title: &str) -> bool {
    let title = title.to_lowercase();
    if EXCLUDED_KEYWORDS.iter().any(|bad| title.contains(bad)) {
        return false;
    }
    ALLOWED_KEYWORDS.iter().any(|ok| title.contains(ok))
}

/// The first marker present in the link decides; an empty id counts as none.
pub fn video_id(link: &str) -> Option<String> {
    let (marker, end) = ID_PATTERNS
        .iter()
        .find(|(marker, _)| link.contains(marker))?;
    let (_, rest) = link.split_once(marker)?;
    let id = rest.split(*end).next().unwrap_or_default();
    (!id.is_empty()).then(|| id.to_string())
}

pub fn thumbnail_for(video_id: Option<&str>) -> String {
    match video_id {
        Some(id) => format!("https://img.youtube.com/vi/{id}/hqdefault.jpg"),
        None => PLACEHOLDER_THUMBNAIL.to_string(),
    }
}

pub fn derive_thumbnail(link: Option<&str>) -> String {
    thumbnail_for(link.and_then(video_id).as_deref())
}

pub fn filter_and_enrich(raw: Vec<RawVideo>) -> Vec<Video> {
    raw.into_iter()
        .filter(|video| passes(&video.title))
        .map(|video| {
            let video_id = video.link.as_deref().and_then(video_id);
            Video {
                thumbnail: thumbnail_for(video_id.as_deref()),
                title: video.title,
                link: video.link,
                video_id,
            }
        })
        .collect()
}
