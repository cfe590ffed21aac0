//! Error types for the HTTP API.

use assistant::AssistantError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use database::{DatabaseError, ValidationError};
use thiserror::Error;

/// Errors that can occur while handling a request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Database error; NotFound and AlreadyExists carry their own statuses.
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Request failed boundary validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Completion API error.
    #[error("Assistant error: {0}")]
    Assistant(#[from] AssistantError),

    /// Missing or invalid credentials.
    #[error("Unauthorized")]
    Unauthorized,

    /// Malformed request.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Database(DatabaseError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, self.to_string())
            }
            ApiError::Database(DatabaseError::AlreadyExists { .. }) => {
                (StatusCode::CONFLICT, self.to_string())
            }
            ApiError::Database(err) => {
                tracing::error!("Database error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            ApiError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            ApiError::Assistant(AssistantError::Configuration(msg)) => {
                tracing::error!("Assistant configuration error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Assistant unavailable".to_string())
            }
            ApiError::Assistant(err) => {
                tracing::error!("Assistant error: {}", err);
                (StatusCode::BAD_GATEWAY, err.to_string())
            }
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
