//! Application configuration management.

use serde::Deserialize;

use crate::types::Currency;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Account rules configuration.
    #[serde(default)]
    pub accounts: AccountsConfig,
    /// Display configuration.
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Storage backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// One JSON file per key under `storage.path`.
    #[default]
    File,
    /// Process-local map, lost on exit.
    Memory,
}

/// Storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Backend to use.
    #[serde(default)]
    pub backend: StorageBackend,
    /// Root directory for the file backend.
    #[serde(default = "default_storage_path")]
    pub path: String,
    /// Key holding the serialized user map.
    #[serde(default = "default_users_key")]
    pub users_key: String,
    /// Key holding the current session email.
    #[serde(default = "default_session_key")]
    pub session_key: String,
}

fn default_storage_path() -> String {
    ".phet".to_string()
}

fn default_users_key() -> String {
    "phet_users".to_string()
}

fn default_session_key() -> String {
    "phet_current".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_storage_path(),
            users_key: default_users_key(),
            session_key: default_session_key(),
        }
    }
}

/// Signup rules.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountsConfig {
    /// Substring every signup email must contain.
    #[serde(default = "default_required_email_domain")]
    pub required_email_domain: String,
    /// Minimum username length in characters.
    #[serde(default = "default_min_username_chars")]
    pub min_username_chars: usize,
    /// Minimum password length in characters.
    #[serde(default = "default_min_password_chars")]
    pub min_password_chars: usize,
}

fn default_required_email_domain() -> String {
    "@gmail.com".to_string()
}

fn default_min_username_chars() -> usize {
    8
}

fn default_min_password_chars() -> usize {
    6
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            required_email_domain: default_required_email_domain(),
            min_username_chars: default_min_username_chars(),
            min_password_chars: default_min_password_chars(),
        }
    }
}

/// Display configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DisplayConfig {
    /// Currency used when rendering amounts.
    #[serde(default)]
    pub currency: Currency,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("PHET").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
