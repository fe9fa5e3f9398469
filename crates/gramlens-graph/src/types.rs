//! Raw response shapes for the Graph API business-discovery expansion.

use serde::Deserialize;

/// One media record under `business_discovery.media.data`.
///
/// Field availability depends on media type: images carry `media_url`,
/// videos carry `thumbnail_url` and sometimes no `media_url` at all.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphMedia {
    pub id: Option<String>,
    pub permalink: Option<String>,
    pub caption: Option<String>,
    pub like_count: Option<u64>,
    pub comments_count: Option<u64>,
    pub media_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub media_type: Option<String>,
    pub timestamp: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MediaConnection {
    #[serde(default)]
    pub data: Vec<GraphMedia>,
}

#[derive(Debug, Deserialize)]
pub struct BusinessDiscovery {
    pub username: Option<String>,
    pub media: Option<MediaConnection>,
}

/// Top-level envelope of a successful discovery request.
#[derive(Debug, Deserialize)]
pub struct BusinessDiscoveryResponse {
    pub business_discovery: BusinessDiscovery,
}

/// Top-level envelope of a failed request.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ApiError,
}

#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub message: Option<String>,
    pub code: Option<i64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}
