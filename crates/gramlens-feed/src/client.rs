//! HTTP client for the private feed API.
//!
//! Wraps `reqwest` with feed-specific error handling and typed response
//! deserialization. A session is established once at construction by
//! exchanging credentials for the bearer token the API returns in its
//! `ig-set-authorization` response header; every later request replays that
//! token verbatim.

use std::fmt;
use std::time::Duration;

use reqwest::{Client, StatusCode, Url};

use crate::error::FeedError;
use crate::types::{FeedItem, UserFeedResponse, UserInfoResponse};

const DEFAULT_BASE_URL: &str = "https://i.instagram.com/api/v1/";

/// Response header carrying the session bearer token after login.
const AUTH_HEADER: &str = "ig-set-authorization";

/// Maximum number of feed pages to fetch per account before returning an
/// error. Prevents infinite loops on cycling cursors.
const MAX_PAGES: usize = 10;

/// Client for the private feed API, holding an authenticated session.
///
/// Use [`FeedClient::login`] for production or
/// [`FeedClient::login_with_base_url`] to point at a mock server in tests.
pub struct FeedClient {
    client: Client,
    base_url: Url,
    session_token: String,
}

impl FeedClient {
    /// Logs in against the production feed API and returns a ready client.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`FeedError::Login`] if the credential
    /// exchange fails.
    pub async fn login(
        username: &str,
        password: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, FeedError> {
        Self::login_with_base_url(username, password, timeout_secs, user_agent, DEFAULT_BASE_URL)
            .await
    }

    /// Logs in against a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, [`FeedError::InvalidBaseUrl`] if `base_url`
    /// does not parse, or [`FeedError::Login`] if the credential exchange
    /// fails.
    pub async fn login_with_base_url(
        username: &str,
        password: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // joined paths land under it rather than replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| FeedError::InvalidBaseUrl {
            url: normalised.clone(),
            reason: e.to_string(),
        })?;

        let session_token = Self::exchange_credentials(&client, &base_url, username, password).await?;

        tracing::debug!(username, "feed session established");

        Ok(Self {
            client,
            base_url,
            session_token,
        })
    }

    /// Posts the credentials and captures the session token from the
    /// `ig-set-authorization` response header.
    async fn exchange_credentials(
        client: &Client,
        base_url: &Url,
        username: &str,
        password: &str,
    ) -> Result<String, FeedError> {
        let url = join_url(base_url, "accounts/login/")?;
        let response = client
            .post(url)
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST
            || status == StatusCode::UNAUTHORIZED
            || status == StatusCode::FORBIDDEN
        {
            return Err(FeedError::Login {
                username: username.to_owned(),
                reason: format!("credentials rejected with status {status}"),
            });
        }
        if !status.is_success() {
            return Err(FeedError::Login {
                username: username.to_owned(),
                reason: format!("login endpoint returned status {status}"),
            });
        }

        let token = response
            .headers()
            .get(AUTH_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_owned);

        token.ok_or_else(|| FeedError::Login {
            username: username.to_owned(),
            reason: format!("response carried no {AUTH_HEADER} header"),
        })
    }

    /// Resolves a handle to the numeric user id the feed endpoint is keyed by.
    ///
    /// # Errors
    ///
    /// - [`FeedError::UnknownAccount`] — HTTP 404 for the handle.
    /// - [`FeedError::RateLimited`] — HTTP 429.
    /// - [`FeedError::UnexpectedStatus`] — any other non-2xx status.
    /// - [`FeedError::Http`] — network failure.
    /// - [`FeedError::Deserialize`] — response does not match the expected shape.
    pub async fn resolve_user_id(&self, handle: &str) -> Result<u64, FeedError> {
        let url = join_url(&self.base_url, &format!("users/{handle}/usernameinfo/"))?;
        let body = self.get_checked(url, handle).await?;

        let parsed: UserInfoResponse =
            serde_json::from_str(&body).map_err(|e| FeedError::Deserialize {
                context: format!("usernameinfo for {handle}"),
                source: e,
            })?;

        tracing::debug!(
            handle,
            user_id = parsed.user.pk,
            username = %parsed.user.username,
            "resolved user id"
        );

        Ok(parsed.user.pk)
    }

    /// Fetches up to `count` recent posts for a handle, following feed
    /// cursors until enough items arrived or the feed is exhausted.
    ///
    /// `page_delay_ms` is the pause between page requests (applied after
    /// every page except the first).
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::resolve_user_id`] or the page
    /// fetches. Returns [`FeedError::PaginationLimit`] if the number of
    /// pages exceeds the internal cap.
    pub async fn fetch_recent_posts(
        &self,
        handle: &str,
        count: u32,
        page_delay_ms: u64,
    ) -> Result<Vec<FeedItem>, FeedError> {
        let user_id = self.resolve_user_id(handle).await?;
        let want = count as usize;

        let mut items: Vec<FeedItem> = Vec::new();
        let mut max_id: Option<String> = None;
        let mut is_first_page = true;
        let mut page_count = 0usize;

        loop {
            page_count += 1;
            if page_count > MAX_PAGES {
                return Err(FeedError::PaginationLimit {
                    handle: handle.to_owned(),
                    max_pages: MAX_PAGES,
                });
            }

            if !is_first_page && page_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(page_delay_ms)).await;
            }
            is_first_page = false;

            let page = self
                .fetch_feed_page(handle, user_id, count, max_id.as_deref())
                .await?;

            items.extend(page.items);

            if items.len() >= want || !page.more_available {
                break;
            }

            max_id = page.next_max_id;
            if max_id.is_none() {
                break;
            }
        }

        items.truncate(want);

        tracing::debug!(
            handle,
            items = items.len(),
            pages = page_count,
            "fetched recent posts"
        );

        Ok(items)
    }

    /// Fetches one page of a user's feed.
    async fn fetch_feed_page(
        &self,
        handle: &str,
        user_id: u64,
        count: u32,
        max_id: Option<&str>,
    ) -> Result<UserFeedResponse, FeedError> {
        let url = Self::feed_page_url(&self.base_url, user_id, count, max_id)?;
        let body = self.get_checked(url, handle).await?;

        serde_json::from_str(&body).map_err(|e| FeedError::Deserialize {
            context: format!("user feed for {handle}"),
            source: e,
        })
    }

    /// Builds the feed-page URL for a user id, page size, and optional cursor.
    fn feed_page_url(
        base_url: &Url,
        user_id: u64,
        count: u32,
        max_id: Option<&str>,
    ) -> Result<Url, FeedError> {
        let mut url = join_url(base_url, &format!("feed/user/{user_id}/"))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("count", &count.to_string());
            if let Some(cursor) = max_id {
                pairs.append_pair("max_id", cursor);
            }
        }
        Ok(url)
    }

    /// Sends an authenticated GET, maps non-2xx statuses to typed errors, and
    /// returns the response body.
    async fn get_checked(&self, url: Url, handle: &str) -> Result<String, FeedError> {
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::AUTHORIZATION, self.session_token.as_str())
            .send()
            .await?;

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(FeedError::UnknownAccount {
                handle: handle.to_owned(),
            });
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(FeedError::RateLimited { retry_after_secs });
        }

        if !status.is_success() {
            return Err(FeedError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

// Hand-written so the session token is never rendered.
impl fmt::Debug for FeedClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedClient")
            .field("base_url", &self.base_url.as_str())
            .field("session_token", &"[redacted]")
            .finish_non_exhaustive()
    }
}

/// Joins a relative path onto the base URL.
fn join_url(base_url: &Url, path: &str) -> Result<Url, FeedError> {
    base_url.join(path).map_err(|e| FeedError::InvalidBaseUrl {
        url: format!("{base_url}{path}"),
        reason: e.to_string(),
    })
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
