//! Conversion from raw feed records to canonical posts.

use gramlens_core::{caption_excerpt, CanonicalPost};

use crate::error::FeedError;
use crate::types::FeedItem;

/// Converts one raw feed record into a [`CanonicalPost`].
///
/// `account` is the queried handle, carried through verbatim as the grouping
/// key. Missing engagement counts normalize to zero and a missing caption to
/// an empty excerpt; only a missing shortcode makes the record unusable,
/// since no permalink can be built without one.
///
/// # Errors
///
/// Returns [`FeedError::MalformedRecord`] when the record has no shortcode.
pub fn normalize_post(
    account: &str,
    item: &FeedItem,
    excerpt_chars: usize,
) -> Result<CanonicalPost, FeedError> {
    let code = item
        .code
        .as_deref()
        .filter(|c| !c.is_empty())
        .ok_or_else(|| FeedError::MalformedRecord {
            media_id: item.id.clone().unwrap_or_else(|| "<unknown>".to_string()),
            reason: "missing shortcode".to_string(),
        })?;

    let caption = item
        .caption
        .as_ref()
        .and_then(|c| c.text.as_deref())
        .unwrap_or_default();

    Ok(CanonicalPost {
        account: account.to_owned(),
        permalink: format!("https://www.instagram.com/p/{code}/"),
        media_url: resolve_media_url(item),
        like_count: item.like_count.unwrap_or(0),
        comment_count: item.comment_count.unwrap_or(0),
        caption_excerpt: caption_excerpt(caption, excerpt_chars),
    })
}

/// Resolves a preview image URL.
///
/// Prefers the record's own thumbnail field; falls back to the first
/// image-version candidate. Later candidates are never consulted, so a first
/// candidate without a URL yields `None`.
fn resolve_media_url(item: &FeedItem) -> Option<String> {
    if let Some(thumb) = item.thumbnail_url.as_deref() {
        if !thumb.is_empty() {
            return Some(thumb.to_owned());
        }
    }

    item.image_versions2
        .as_ref()
        .and_then(|versions| versions.candidates.first())
        .and_then(|candidate| candidate.url.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Caption, ImageCandidate, ImageVersions};

    fn item(code: Option<&str>) -> FeedItem {
        FeedItem {
            id: Some("3141592653589793238_787132".to_string()),
            code: code.map(str::to_string),
            like_count: Some(120),
            comment_count: Some(8),
            caption: Some(Caption {
                text: Some("launch day\nmore below".to_string()),
            }),
            thumbnail_url: Some("https://cdn.example.com/thumb.jpg".to_string()),
            image_versions2: Some(ImageVersions {
                candidates: vec![ImageCandidate {
                    url: Some("https://cdn.example.com/candidate.jpg".to_string()),
                }],
            }),
        }
    }

    #[test]
    fn normalizes_full_record() {
        let post = normalize_post("nintendo_jp", &item(Some("DHq4zXwy8Mb")), 50).unwrap();
        assert_eq!(post.account, "nintendo_jp");
        assert_eq!(post.permalink, "https://www.instagram.com/p/DHq4zXwy8Mb/");
        assert_eq!(
            post.media_url.as_deref(),
            Some("https://cdn.example.com/thumb.jpg")
        );
        assert_eq!(post.like_count, 120);
        assert_eq!(post.comment_count, 8);
        assert_eq!(post.caption_excerpt, "launch day more below");
    }

    #[test]
    fn missing_shortcode_is_malformed() {
        let err = normalize_post("nintendo_jp", &item(None), 50).unwrap_err();
        match err {
            FeedError::MalformedRecord { media_id, reason } => {
                assert_eq!(media_id, "3141592653589793238_787132");
                assert!(reason.contains("shortcode"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_shortcode_is_malformed() {
        let err = normalize_post("nintendo_jp", &item(Some("")), 50).unwrap_err();
        assert!(matches!(err, FeedError::MalformedRecord { .. }));
    }

    #[test]
    fn missing_counts_default_to_zero() {
        let mut raw = item(Some("DHq4zXwy8Mb"));
        raw.like_count = None;
        raw.comment_count = None;
        let post = normalize_post("sony", &raw, 50).unwrap();
        assert_eq!(post.like_count, 0);
        assert_eq!(post.comment_count, 0);
    }

    #[test]
    fn missing_caption_yields_empty_excerpt() {
        let mut raw = item(Some("DHq4zXwy8Mb"));
        raw.caption = None;
        let post = normalize_post("sony", &raw, 50).unwrap();
        assert_eq!(post.caption_excerpt, "");
    }

    #[test]
    fn null_caption_text_yields_empty_excerpt() {
        let mut raw = item(Some("DHq4zXwy8Mb"));
        raw.caption = Some(Caption { text: None });
        let post = normalize_post("sony", &raw, 50).unwrap();
        assert_eq!(post.caption_excerpt, "");
    }

    #[test]
    fn empty_thumbnail_falls_back_to_candidate() {
        let mut raw = item(Some("DHq4zXwy8Mb"));
        raw.thumbnail_url = Some(String::new());
        let post = normalize_post("sony", &raw, 50).unwrap();
        assert_eq!(
            post.media_url.as_deref(),
            Some("https://cdn.example.com/candidate.jpg")
        );
    }

    #[test]
    fn missing_thumbnail_falls_back_to_candidate() {
        let mut raw = item(Some("DHq4zXwy8Mb"));
        raw.thumbnail_url = None;
        let post = normalize_post("sony", &raw, 50).unwrap();
        assert_eq!(
            post.media_url.as_deref(),
            Some("https://cdn.example.com/candidate.jpg")
        );
    }

    #[test]
    fn no_media_at_all_yields_none() {
        let mut raw = item(Some("DHq4zXwy8Mb"));
        raw.thumbnail_url = None;
        raw.image_versions2 = None;
        let post = normalize_post("sony", &raw, 50).unwrap();
        assert!(post.media_url.is_none());
    }

    #[test]
    fn first_candidate_without_url_yields_none() {
        let mut raw = item(Some("DHq4zXwy8Mb"));
        raw.thumbnail_url = None;
        raw.image_versions2 = Some(ImageVersions {
            candidates: vec![
                ImageCandidate { url: None },
                ImageCandidate {
                    url: Some("https://cdn.example.com/second.jpg".to_string()),
                },
            ],
        });
        let post = normalize_post("sony", &raw, 50).unwrap();
        assert!(post.media_url.is_none());
    }

    #[test]
    fn empty_candidate_list_yields_none() {
        let mut raw = item(Some("DHq4zXwy8Mb"));
        raw.thumbnail_url = None;
        raw.image_versions2 = Some(ImageVersions { candidates: vec![] });
        let post = normalize_post("sony", &raw, 50).unwrap();
        assert!(post.media_url.is_none());
    }

    #[test]
    fn excerpt_length_flows_through() {
        let mut raw = item(Some("DHq4zXwy8Mb"));
        raw.caption = Some(Caption {
            text: Some("x".repeat(100)),
        });
        let post = normalize_post("sony", &raw, 30).unwrap();
        assert_eq!(post.caption_excerpt.chars().count(), 30);
    }
}
