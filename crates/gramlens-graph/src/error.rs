use thiserror::Error;

/// Errors returned by the Graph API client.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The Graph API returned an error envelope.
    #[error("Graph API error {code}: {message}")]
    Api { code: i64, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The handle does not resolve to a discoverable business account.
    #[error("account {handle} is not discoverable as a business user")]
    NotDiscoverable { handle: String },

    /// A non-2xx status without a parseable error envelope.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// A raw record is missing a field without which no post can be built.
    #[error("malformed record {media_id}: {reason}")]
    MalformedRecord { media_id: String, reason: String },

    /// The configured base URL does not parse.
    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
