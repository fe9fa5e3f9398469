//! Raw response shapes for the private feed API.
//!
//! Fields mirror the wire format and stay loose on purpose: the feed is an
//! unversioned API and records routinely omit counts, captions, or whole
//! media blocks. [`crate::normalize_post`] decides what is fatal.

use serde::Deserialize;

/// One raw post record from a user feed page.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedItem {
    /// Opaque media id, e.g. `"3141592653589793238_787132"`.
    pub id: Option<String>,
    /// Shortcode used in public post URLs.
    pub code: Option<String>,
    pub like_count: Option<u64>,
    pub comment_count: Option<u64>,
    pub caption: Option<Caption>,
    /// Direct preview URL, present on some record shapes.
    pub thumbnail_url: Option<String>,
    /// Sized preview candidates, present on others.
    pub image_versions2: Option<ImageVersions>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Caption {
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageVersions {
    #[serde(default)]
    pub candidates: Vec<ImageCandidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageCandidate {
    pub url: Option<String>,
}

/// One page of a user's feed.
#[derive(Debug, Deserialize)]
pub struct UserFeedResponse {
    #[serde(default)]
    pub items: Vec<FeedItem>,
    pub next_max_id: Option<String>,
    #[serde(default)]
    pub more_available: bool,
}

/// Envelope for the `usernameinfo` endpoint.
#[derive(Debug, Deserialize)]
pub struct UserInfoResponse {
    pub user: UserInfo,
}

#[derive(Debug, Deserialize)]
pub struct UserInfo {
    /// Numeric user id the feed endpoint is keyed by.
    pub pk: u64,
    pub username: String,
}
