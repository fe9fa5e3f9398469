//! Core domain types and configuration for gramlens.
//!
//! Holds the canonical post shape that every data source normalizes into,
//! the runtime configuration loaded from environment variables, and the
//! roster of target accounts read from YAML.

pub mod accounts;
pub mod app_config;
pub mod config;
pub mod error;
pub mod post;

pub use accounts::{load_accounts, AccountConfig, AccountsFile};
pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use post::{caption_excerpt, CanonicalPost};
