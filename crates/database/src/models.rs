//! Database models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// UUID assigned at signup.
    pub id: String,
    /// First name.
    pub name: String,
    /// Last name.
    pub surname: String,
    /// Contact phone number.
    pub phone_number: String,
    /// Email address, unique per user.
    pub email: String,
    /// Bcrypt hash of the password. Never serialized into API responses.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A conversation thread owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Chat {
    /// UUID assigned at creation.
    pub id: String,
    /// Display name, non-empty and at most 100 characters.
    pub name: String,
    /// Owning user's ID.
    pub user_id: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Bumped whenever a message is appended.
    pub updated_at: DateTime<Utc>,
}

/// One utterance inside a chat. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Message {
    /// UUID assigned at creation.
    pub id: String,
    /// Owning chat's ID.
    pub chat_id: String,
    /// Author role: "user", "assistant", or "system".
    pub role: String,
    /// Message text, non-empty.
    pub content: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Derived view of a chat for list display. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSummary {
    /// Chat ID.
    pub id: String,
    /// Chat display name.
    pub name: String,
    /// Content of the most recent message, empty if the chat has none.
    pub preview: String,
    /// The later of the chat's updated_at and its newest message's created_at.
    pub last_activity: DateTime<Utc>,
}
