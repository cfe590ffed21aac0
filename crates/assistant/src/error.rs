//! Assistant error types.

use thiserror::Error;

/// Errors that can occur when talking to the completion API.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Network-level failure reaching the API.
    #[error("network error: {0}")]
    Network(String),

    /// The API answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

/// Result type for assistant operations.
pub type Result<T> = std::result::Result<T, AssistantError>;
