//! Error types for the telegram-mcp library.

use thiserror::Error;

/// Unified error type for the adapter.
///
/// The set of variants is closed: argument validation, dispatch, the
/// collaborator and configuration all report through this one enum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TelegramError {
    /// Required configuration is missing or invalid
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    /// The client has not completed authorization
    #[error("Telegram client is not authorized")]
    NotAuthorized,

    /// The client has not been initialized
    #[error("Telegram client is not initialized")]
    ClientNotInitialized,

    /// An authorization step was rejected
    #[error("Authorization failed: {0}")]
    AuthorizationFailed(String),

    /// A required tool argument is absent
    #[error("Missing required argument: {0}")]
    MissingRequiredArgument(String),

    /// A tool argument has the right type but an unusable value
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument { name: String, reason: String },

    /// A tool argument has the wrong type
    #[error("Invalid type for '{name}': expected {expected}, got {got}")]
    InvalidArgumentType {
        name: String,
        expected: String,
        got: String,
    },

    /// No tool is registered under the name
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// The tool call could not run to completion
    #[error("Tool execution failed: {0}")]
    ToolExecutionFailed(String),

    /// Error reported by the messaging backend
    #[error("TDLib error [{code}]: {message}")]
    Backend { code: i32, message: String },

    #[error("Chat not found: {0}")]
    ChatNotFound(i64),

    #[error("User not found: {0}")]
    UserNotFound(i64),

    #[error("Message not found: {0}")]
    MessageNotFound(i64),

    /// JSON encoding or decoding error
    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl TelegramError {
    /// Creates an `InvalidArgument` error.
    pub fn invalid_argument(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Creates an `InvalidArgumentType` error.
    pub fn invalid_type(
        name: impl Into<String>,
        expected: impl Into<String>,
        got: impl Into<String>,
    ) -> Self {
        Self::InvalidArgumentType {
            name: name.into(),
            expected: expected.into(),
            got: got.into(),
        }
    }
}

impl From<serde_json::Error> for TelegramError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encoding(err.to_string())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TelegramError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            TelegramError::MissingRequiredArgument("chat_id".into()).to_string(),
            "Missing required argument: chat_id"
        );
        assert_eq!(
            TelegramError::invalid_type("limit", "integer", "string").to_string(),
            "Invalid type for 'limit': expected integer, got string"
        );
        assert_eq!(
            TelegramError::Backend {
                code: 400,
                message: "CHAT_ID_INVALID".into()
            }
            .to_string(),
            "TDLib error [400]: CHAT_ID_INVALID"
        );
        assert_eq!(
            TelegramError::ToolNotFound("nope".into()).to_string(),
            "Tool not found: nope"
        );
    }

    #[test]
    fn test_json_error_maps_to_encoding() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(TelegramError::from(err), TelegramError::Encoding(_)));
    }
}
