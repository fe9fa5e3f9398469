use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One target account in the research roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Instagram handle, without the leading `@`.
    pub handle: String,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AccountsFile {
    pub accounts: Vec<AccountConfig>,
}

/// Load and validate the account roster from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_accounts(path: &Path) -> Result<AccountsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::AccountsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let accounts_file: AccountsFile =
        serde_yaml::from_str(&content).map_err(ConfigError::AccountsFileParse)?;

    validate_accounts(&accounts_file)?;

    Ok(accounts_file)
}

fn validate_accounts(accounts_file: &AccountsFile) -> Result<(), ConfigError> {
    if accounts_file.accounts.is_empty() {
        return Err(ConfigError::Validation(
            "accounts roster must list at least one account".to_string(),
        ));
    }

    let mut seen = HashSet::new();

    for account in &accounts_file.accounts {
        if account.handle.trim().is_empty() {
            return Err(ConfigError::Validation(
                "account handle must be non-empty".to_string(),
            ));
        }

        if account.handle.starts_with('@') {
            return Err(ConfigError::Validation(format!(
                "account handle '{}' must not include the leading '@'",
                account.handle
            )));
        }

        if account.handle.chars().any(char::is_whitespace) {
            return Err(ConfigError::Validation(format!(
                "account handle '{}' must not contain whitespace",
                account.handle
            )));
        }

        if !seen.insert(account.handle.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate account handle: '{}'",
                account.handle
            )));
        }
    }

    Ok(())
}
