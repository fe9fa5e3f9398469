use thiserror::Error;

/// Errors raised while loading configuration or the account roster.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable was set to a value that does not parse.
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    /// A source was selected whose credentials are not configured.
    ///
    /// The field is `source_name` rather than `source` so thiserror does not
    /// treat it as an error cause.
    #[error("missing credentials for the {source_name} source: set {vars}")]
    MissingCredentials {
        source_name: &'static str,
        vars: String,
    },

    /// The accounts roster file could not be read.
    #[error("failed to read accounts file {path}: {source}")]
    AccountsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The accounts roster file is not valid YAML.
    #[error("failed to parse accounts file: {0}")]
    AccountsFileParse(#[from] serde_yaml::Error),

    /// Configuration parsed but failed a cross-field check.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
