//! Conversion from Graph media records to canonical posts.

use gramlens_core::{caption_excerpt, CanonicalPost};

use crate::error::GraphError;
use crate::types::GraphMedia;

/// Converts one Graph media record into a [`CanonicalPost`].
///
/// `account` is the queried handle, carried through verbatim as the grouping
/// key even though the record names its own `username`. Missing engagement
/// counts normalize to zero and a missing caption to an empty excerpt; only
/// a missing permalink makes the record unusable.
///
/// # Errors
///
/// Returns [`GraphError::MalformedRecord`] when the record has no permalink.
pub fn normalize_media(
    account: &str,
    media: &GraphMedia,
    excerpt_chars: usize,
) -> Result<CanonicalPost, GraphError> {
    let permalink = media
        .permalink
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| GraphError::MalformedRecord {
            media_id: media.id.clone().unwrap_or_else(|| "<unknown>".to_string()),
            reason: "missing permalink".to_string(),
        })?;

    let caption = media.caption.as_deref().unwrap_or_default();

    Ok(CanonicalPost {
        account: account.to_owned(),
        permalink: permalink.to_owned(),
        media_url: resolve_media_url(media),
        like_count: media.like_count.unwrap_or(0),
        comment_count: media.comments_count.unwrap_or(0),
        caption_excerpt: caption_excerpt(caption, excerpt_chars),
    })
}

/// Resolves a preview image URL.
///
/// Prefers `thumbnail_url` (the poster frame on videos) over `media_url`,
/// which for videos points at the clip itself rather than an image.
fn resolve_media_url(media: &GraphMedia) -> Option<String> {
    if let Some(thumb) = media.thumbnail_url.as_deref() {
        if !thumb.is_empty() {
            return Some(thumb.to_owned());
        }
    }
    media
        .media_url
        .as_deref()
        .filter(|m| !m.is_empty())
        .map(str::to_owned)
}
