use thiserror::Error;

/// Errors returned by the private-feed client.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The login endpoint rejected the credentials or returned no session.
    #[error("login failed for {username}: {reason}")]
    Login { username: String, reason: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The queried handle does not resolve to an account.
    #[error("unknown account: {handle}")]
    UnknownAccount { handle: String },

    /// HTTP 429 from the feed API.
    #[error("rate limited by the feed API (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    /// Any other non-2xx status.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// A raw record is missing a field without which no post can be built.
    #[error("malformed record {media_id}: {reason}")]
    MalformedRecord { media_id: String, reason: String },

    /// The cursor loop exceeded the page cap without exhausting the feed.
    #[error("pagination limit reached for {handle}: exceeded {max_pages} pages")]
    PaginationLimit { handle: String, max_pages: usize },

    /// The configured base URL does not parse.
    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
