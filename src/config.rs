use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, TelegramError};

/// Default directory for the client's local database.
pub const DEFAULT_DATABASE_DIRECTORY: &str = "tdlib_data";
/// Default directory for the client's file cache.
pub const DEFAULT_FILES_DIRECTORY: &str = "tdlib_files";

/// Configuration for the Telegram client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// API ID from https://my.telegram.org
    pub api_id: i32,
    /// API hash from https://my.telegram.org
    pub api_hash: String,
    #[serde(default = "default_database_directory")]
    pub database_directory: String,
    #[serde(default = "default_files_directory")]
    pub files_directory: String,
    #[serde(default = "default_true")]
    pub use_message_database: bool,
    #[serde(default = "default_true")]
    pub use_file_database: bool,
    #[serde(default = "default_true")]
    pub use_chat_info_database: bool,
    #[serde(default = "default_language")]
    pub system_language_code: String,
    #[serde(default = "default_device_model")]
    pub device_model: String,
    #[serde(default = "default_application_version")]
    pub application_version: String,
}

fn default_database_directory() -> String {
    DEFAULT_DATABASE_DIRECTORY.to_string()
}

fn default_files_directory() -> String {
    DEFAULT_FILES_DIRECTORY.to_string()
}

fn default_true() -> bool {
    true
}

fn default_language() -> String {
    "en".to_string()
}

fn default_device_model() -> String {
    "iOS".to_string()
}

fn default_application_version() -> String {
    "1.0.0".to_string()
}

impl TelegramConfig {
    /// Creates a configuration with default settings.
    pub fn new(api_id: i32, api_hash: impl Into<String>) -> Self {
        Self {
            api_id,
            api_hash: api_hash.into(),
            database_directory: default_database_directory(),
            files_directory: default_files_directory(),
            use_message_database: true,
            use_file_database: true,
            use_chat_info_database: true,
            system_language_code: default_language(),
            device_model: default_device_model(),
            application_version: default_application_version(),
        }
    }

    /// Reads `TELEGRAM_API_ID` and `TELEGRAM_API_HASH` from the environment.
    ///
    /// `TELEGRAM_DATABASE_DIR` and `TELEGRAM_FILES_DIR` override the storage
    /// directories when set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_id = lookup("TELEGRAM_API_ID")
            .and_then(|id| id.trim().parse::<i32>().ok())
            .ok_or_else(|| TelegramError::MissingConfiguration("TELEGRAM_API_ID".to_string()))?;
        let api_hash = lookup("TELEGRAM_API_HASH")
            .ok_or_else(|| TelegramError::MissingConfiguration("TELEGRAM_API_HASH".to_string()))?;

        let mut config = Self::new(api_id, api_hash);
        if let Some(dir) = lookup("TELEGRAM_DATABASE_DIR") {
            config.database_directory = dir;
        }
        if let Some(dir) = lookup("TELEGRAM_FILES_DIR") {
            config.files_directory = dir;
        }
        Ok(config)
    }

    /// Loads the configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            TelegramError::MissingConfiguration(format!("{}: {}", path.display(), e))
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Checks that the credentials are usable.
    pub fn validate(&self) -> Result<()> {
        if self.api_id <= 0 {
            return Err(TelegramError::MissingConfiguration(
                "API ID must be positive".to_string(),
            ));
        }
        if self.api_hash.is_empty() {
            return Err(TelegramError::MissingConfiguration(
                "API Hash is required".to_string(),
            ));
        }
        Ok(())
    }
}
