//! Client error types.

use daybook_core::{StoreError, TracingError};
use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// User input could not be parsed.
    #[error("invalid input: {0}")]
    Input(String),

    /// Input ended while a prompt was waiting for an answer.
    #[error("unexpected end of input")]
    EndOfInput,

    /// Store signal that the caller chose not to handle.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output could not be serialized.
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    /// Logging could not be set up.
    #[error(transparent)]
    Tracing(#[from] TracingError),
}

impl ClientError {
    /// Creates an input error.
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input(message.into())
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
