//! Error types for bright-core

use thiserror::Error;

/// Result type alias using bright-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in bright-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// No session token, or the server rejected the one we sent
    #[error("Authentication required: sign in first")]
    AuthRequired,

    /// Sign-in or sign-up rejected by the server
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// Malformed or missing required fields, from the client or the server
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Transport failure or a non-success status without a structured meaning
    #[error("Network error: {0}")]
    Network(String),

    /// Entry not found
    #[error("Entry not found: {0}")]
    NotFound(String),

    /// Feedback generation failed
    #[error("Feedback request failed: {0}")]
    Feedback(String),

    /// SQLite error from the offline store
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Token persistence error
    #[error("Secure storage error: {0}")]
    SecureStorage(String),

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Self::Network(error.to_string())
    }
}
