//! Error types for NullBot.

use thiserror::Error;

/// Primary error type for all NullBot operations.
#[derive(Error, Debug)]
pub enum NullBotError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("No API key configured")]
    CredentialMissing,

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Stream error: {0}")]
    Stream(String),

    #[error("A request is already in flight")]
    Busy,
}

impl NullBotError {
    /// Create an API error from a status code and response body.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Classify this error into a category for user-facing handling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::CredentialMissing => ErrorCategory::Credentials,
            Self::Authentication(_) => ErrorCategory::Authentication,
            Self::Api { status, .. } => match status {
                401 | 403 => ErrorCategory::Authentication,
                _ => ErrorCategory::Provider,
            },
            Self::Network(_) | Self::Stream(_) => ErrorCategory::Transport,
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::Busy => ErrorCategory::Busy,
            _ => ErrorCategory::Other,
        }
    }

    /// Whether the user can recover by re-entering their API key.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.category(), ErrorCategory::Authentication)
    }
}

/// Broad error category, used to pick the user-visible notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Credentials,
    Authentication,
    Provider,
    Transport,
    Configuration,
    Busy,
    Other,
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, NullBotError>;
