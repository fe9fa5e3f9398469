//! HTTP client for the Graph API business-discovery endpoint.
//!
//! Wraps `reqwest` with Graph-specific error handling and typed response
//! deserialization. Failed requests carry a JSON error envelope whose `code`
//! distinguishes undiscoverable handles from token and quota problems; the
//! envelope is surfaced as [`GraphError::NotDiscoverable`] or
//! [`GraphError::Api`].

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::GraphError;
use crate::types::{ApiError, BusinessDiscoveryResponse, ErrorEnvelope, GraphMedia};

const DEFAULT_BASE_URL: &str = "https://graph.facebook.com/v21.0/";

/// Error code the Graph API uses for handles that are not business accounts,
/// do not exist, or hide their media.
const CODE_NOT_DISCOVERABLE: i64 = 110;

/// Client for the Graph API business-discovery endpoint.
///
/// Use [`GraphClient::new`] for production or [`GraphClient::with_base_url`]
/// to point at a mock server in tests.
pub struct GraphClient {
    client: Client,
    base_url: Url,
    access_token: String,
}

impl GraphClient {
    /// Creates a new client pointed at the production Graph API.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        access_token: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, GraphError> {
        Self::with_base_url(access_token, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GraphError::InvalidBaseUrl`] if `base_url`
    /// does not parse.
    pub fn with_base_url(
        access_token: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, GraphError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so the
        // user-id segment lands under it rather than replacing the version
        // segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| GraphError::InvalidBaseUrl {
            url: normalised.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            access_token: access_token.to_owned(),
        })
    }

    /// Fetches up to `count` recent media records for `handle` via the
    /// business-discovery expansion, issued on behalf of the token-holding
    /// business user `user_id`.
    ///
    /// The whole batch arrives in one response; there is no cursor to follow
    /// because `media.limit(count)` bounds the expansion server-side.
    ///
    /// # Errors
    ///
    /// - [`GraphError::NotDiscoverable`] — handle is not a business account.
    /// - [`GraphError::Api`] — any other Graph error envelope (bad token,
    ///   quota, permission).
    /// - [`GraphError::Http`] — network failure.
    /// - [`GraphError::UnexpectedStatus`] — non-2xx without an envelope.
    /// - [`GraphError::Deserialize`] — response does not match the expected
    ///   shape.
    pub async fn discover_recent_media(
        &self,
        user_id: &str,
        handle: &str,
        count: u32,
    ) -> Result<Vec<GraphMedia>, GraphError> {
        let url = self.discovery_url(user_id, handle, count)?;
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(&body) {
                return Err(map_api_error(handle, &envelope.error));
            }
            return Err(GraphError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let parsed: BusinessDiscoveryResponse =
            serde_json::from_str(&body).map_err(|e| GraphError::Deserialize {
                context: format!("business discovery for {handle}"),
                source: e,
            })?;

        let records = parsed
            .business_discovery
            .media
            .map(|connection| connection.data)
            .unwrap_or_default();

        tracing::debug!(handle, records = records.len(), "discovered recent media");

        Ok(records)
    }

    /// Builds the discovery URL with the field expansion for `handle` and
    /// the requested media fields.
    fn discovery_url(&self, user_id: &str, handle: &str, count: u32) -> Result<Url, GraphError> {
        let fields = format!(
            "business_discovery.username({handle}){{media.limit({count}){{id,permalink,caption,like_count,comments_count,media_url,thumbnail_url,media_type,timestamp}}}}"
        );

        let mut url = self
            .base_url
            .join(user_id)
            .map_err(|e| GraphError::InvalidBaseUrl {
                url: format!("{}{user_id}", self.base_url),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("fields", &fields);
            pairs.append_pair("access_token", &self.access_token);
        }
        Ok(url)
    }
}

/// Maps a Graph error envelope to a typed error.
fn map_api_error(handle: &str, error: &ApiError) -> GraphError {
    let code = error.code.unwrap_or(-1);
    if code == CODE_NOT_DISCOVERABLE {
        return GraphError::NotDiscoverable {
            handle: handle.to_owned(),
        };
    }
    GraphError::Api {
        code,
        message: error
            .message
            .clone()
            .unwrap_or_else(|| "unknown error".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> GraphClient {
        GraphClient::with_base_url("test-token", 30, "gramlens-test/0.1", base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn discovery_url_encodes_field_expansion() {
        let client = test_client("https://graph.facebook.com/v21.0");
        let url = client
            .discovery_url("17841400000000000", "nintendo_jp", 10)
            .unwrap();
        assert!(url
            .as_str()
            .starts_with("https://graph.facebook.com/v21.0/17841400000000000?fields="));

        let (_, fields) = url
            .query_pairs()
            .find(|(k, _)| k == "fields")
            .expect("fields param present");
        assert_eq!(
            fields,
            "business_discovery.username(nintendo_jp){media.limit(10){id,permalink,caption,like_count,comments_count,media_url,thumbnail_url,media_type,timestamp}}"
        );
    }

    #[test]
    fn discovery_url_carries_access_token() {
        let client = test_client("https://graph.facebook.com/v21.0/");
        let url = client.discovery_url("17841400000000000", "sony", 5).unwrap();
        let (_, token) = url
            .query_pairs()
            .find(|(k, _)| k == "access_token")
            .expect("access_token param present");
        assert_eq!(token, "test-token");
    }

    #[test]
    fn map_api_error_distinguishes_undiscoverable() {
        let error = ApiError {
            message: Some("(#110) Username is not available".to_string()),
            code: Some(110),
            kind: Some("OAuthException".to_string()),
        };
        let mapped = map_api_error("ghost", &error);
        assert!(
            matches!(mapped, GraphError::NotDiscoverable { ref handle } if handle == "ghost"),
            "expected NotDiscoverable, got: {mapped:?}"
        );
    }

    #[test]
    fn map_api_error_passes_through_other_codes() {
        let error = ApiError {
            message: Some("Invalid OAuth access token".to_string()),
            code: Some(190),
            kind: Some("OAuthException".to_string()),
        };
        let mapped = map_api_error("sony", &error);
        match mapped {
            GraphError::Api { code, message } => {
                assert_eq!(code, 190);
                assert!(message.contains("access token"));
            }
            other => panic!("expected Api, got: {other:?}"),
        }
    }
}
