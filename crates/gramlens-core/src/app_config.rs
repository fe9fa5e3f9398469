//! Runtime configuration shared across the workspace.

use std::fmt;
use std::path::PathBuf;

use crate::ConfigError;

/// Application configuration, normally built by [`crate::load_app_config`].
///
/// Credentials are optional at load time; each source checks for its own via
/// [`AppConfig::feed_credentials`] or [`AppConfig::graph_credentials`] so a
/// run that only touches one source never demands the other's secrets.
#[derive(Clone)]
pub struct AppConfig {
    /// Username for the private-feed source.
    pub ig_username: Option<String>,
    /// Password for the private-feed source.
    pub ig_password: Option<String>,
    /// Access token for the Graph API source.
    pub graph_access_token: Option<String>,
    /// Business user id the Graph API token belongs to.
    pub graph_user_id: Option<String>,
    /// Path to the YAML account roster.
    pub accounts_path: PathBuf,
    /// How many recent posts to request per account.
    pub fetch_count: u32,
    /// Caption excerpt length in characters.
    pub caption_excerpt_chars: usize,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// User agent sent on every outbound request.
    pub user_agent: String,
    /// Lower bound of the jittered pause between accounts, in milliseconds.
    pub account_delay_min_ms: u64,
    /// Upper bound of the jittered pause between accounts, in milliseconds.
    pub account_delay_max_ms: u64,
    /// Pause between feed pages for one account, in milliseconds.
    pub page_delay_ms: u64,
}

impl AppConfig {
    /// Username and password for the private-feed source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingCredentials`] naming every unset
    /// variable when either half is absent.
    pub fn feed_credentials(&self) -> Result<(&str, &str), ConfigError> {
        match (self.ig_username.as_deref(), self.ig_password.as_deref()) {
            (Some(user), Some(pass)) => Ok((user, pass)),
            (user, pass) => {
                let mut vars = Vec::new();
                if user.is_none() {
                    vars.push("GRAMLENS_IG_USERNAME");
                }
                if pass.is_none() {
                    vars.push("GRAMLENS_IG_PASSWORD");
                }
                Err(ConfigError::MissingCredentials {
                    source_name: "feed",
                    vars: vars.join(", "),
                })
            }
        }
    }

    /// Access token and business user id for the Graph API source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingCredentials`] naming every unset
    /// variable when either half is absent.
    pub fn graph_credentials(&self) -> Result<(&str, &str), ConfigError> {
        match (
            self.graph_access_token.as_deref(),
            self.graph_user_id.as_deref(),
        ) {
            (Some(token), Some(user_id)) => Ok((token, user_id)),
            (token, user_id) => {
                let mut vars = Vec::new();
                if token.is_none() {
                    vars.push("GRAMLENS_GRAPH_ACCESS_TOKEN");
                }
                if user_id.is_none() {
                    vars.push("GRAMLENS_GRAPH_USER_ID");
                }
                Err(ConfigError::MissingCredentials {
                    source_name: "graph",
                    vars: vars.join(", "),
                })
            }
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("ig_username", &self.ig_username)
            .field("ig_password", &self.ig_password.as_ref().map(|_| "[redacted]"))
            .field(
                "graph_access_token",
                &self.graph_access_token.as_ref().map(|_| "[redacted]"),
            )
            .field("graph_user_id", &self.graph_user_id)
            .field("accounts_path", &self.accounts_path)
            .field("fetch_count", &self.fetch_count)
            .field("caption_excerpt_chars", &self.caption_excerpt_chars)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("account_delay_min_ms", &self.account_delay_min_ms)
            .field("account_delay_max_ms", &self.account_delay_max_ms)
            .field("page_delay_ms", &self.page_delay_ms)
            .finish()
    }
}
