//! Database error types.

use thiserror::Error;

/// Errors that can occur during database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// SQLx error (connection, query, etc.)
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Migration error
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A looked-up record is absent: a chat or user id, or a login email.
    /// Appending a message to a deleted chat lands here too.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A uniqueness rule was violated; in this schema that is a signup with
    /// an email that is already registered.
    #[error("{entity} already exists: {id}")]
    AlreadyExists { entity: &'static str, id: String },
}

impl DatabaseError {
    /// Shorthand for a [`DatabaseError::NotFound`].
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        DatabaseError::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Shorthand for a [`DatabaseError::AlreadyExists`].
    pub fn already_exists(entity: &'static str, id: impl Into<String>) -> Self {
        DatabaseError::AlreadyExists {
            entity,
            id: id.into(),
        }
    }
}

/// Result type for database operations.
pub type Result<T> = std::result::Result<T, DatabaseError>;
