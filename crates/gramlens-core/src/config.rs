use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration, reading `.env` first via `dotenvy`.
///
/// # Errors
///
/// Returns `ConfigError` if any env var holds a value that does not parse or
/// fails validation.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from the process environment as-is.
///
/// Skips the `.env` lookup that [`load_app_config`] performs, for callers
/// that manage the environment themselves.
///
/// # Errors
///
/// Returns `ConfigError` if any env var holds a value that does not parse or
/// fails validation.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Parsing and validation behind an injected lookup, so tests can drive it
/// with a plain `HashMap` instead of mutating the process environment.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let ig_username = lookup("GRAMLENS_IG_USERNAME").ok();
    let ig_password = lookup("GRAMLENS_IG_PASSWORD").ok();
    let graph_access_token = lookup("GRAMLENS_GRAPH_ACCESS_TOKEN").ok();
    let graph_user_id = lookup("GRAMLENS_GRAPH_USER_ID").ok();

    let accounts_path = PathBuf::from(or_default(
        "GRAMLENS_ACCOUNTS_PATH",
        "./config/accounts.yaml",
    ));

    let fetch_count = parse_u32("GRAMLENS_FETCH_COUNT", "10")?;
    if fetch_count == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "GRAMLENS_FETCH_COUNT".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let caption_excerpt_chars = parse_usize("GRAMLENS_CAPTION_EXCERPT_CHARS", "50")?;
    if caption_excerpt_chars == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "GRAMLENS_CAPTION_EXCERPT_CHARS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let request_timeout_secs = parse_u64("GRAMLENS_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("GRAMLENS_USER_AGENT", "gramlens/0.1 (engagement-research)");

    let account_delay_min_ms = parse_u64("GRAMLENS_ACCOUNT_DELAY_MIN_MS", "5000")?;
    let account_delay_max_ms = parse_u64("GRAMLENS_ACCOUNT_DELAY_MAX_MS", "10000")?;
    if account_delay_min_ms > account_delay_max_ms {
        return Err(ConfigError::InvalidEnvVar {
            var: "GRAMLENS_ACCOUNT_DELAY_MIN_MS".to_string(),
            reason: "must not exceed GRAMLENS_ACCOUNT_DELAY_MAX_MS".to_string(),
        });
    }

    let page_delay_ms = parse_u64("GRAMLENS_PAGE_DELAY_MS", "250")?;

    Ok(AppConfig {
        ig_username,
        ig_password,
        graph_access_token,
        graph_user_id,
        accounts_path,
        fetch_count,
        caption_excerpt_chars,
        request_timeout_secs,
        user_agent,
        account_delay_min_ms,
        account_delay_max_ms,
        page_delay_ms,
    })
}
