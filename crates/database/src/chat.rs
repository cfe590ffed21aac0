//! Chat CRUD operations.
//!
//! Deleting a chat removes its messages in the same transaction, so no orphan
//! messages are readable afterwards.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::Chat;

/// Create a new chat. Names are not unique; a user may hold any number of
/// chats with the same name.
pub async fn create_chat(pool: &SqlitePool, chat: &Chat) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO chats (id, name, user_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&chat.id)
    .bind(&chat.name)
    .bind(&chat.user_id)
    .bind(chat.created_at)
    .bind(chat.updated_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get a chat by ID.
pub async fn get_chat(pool: &SqlitePool, id: &str) -> Result<Chat> {
    sqlx::query_as::<_, Chat>(
        r#"
        SELECT id, name, user_id, created_at, updated_at
        FROM chats
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::not_found("Chat", id))
}

/// List all chats owned by a user, most recently updated first.
pub async fn list_chats(pool: &SqlitePool, user_id: &str) -> Result<Vec<Chat>> {
    let chats = sqlx::query_as::<_, Chat>(
        r#"
        SELECT id, name, user_id, created_at, updated_at
        FROM chats
        WHERE user_id = ?
        ORDER BY updated_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(chats)
}

/// Create a chat by (name, owner) or bump updated_at on an existing one.
///
/// Duplicate names are allowed, so when several match, the most recently
/// updated one is bumped. Returns the stored chat either way. Used by the
/// session endpoint, which creates a chat implicitly on first message send.
pub async fn upsert_chat(
    pool: &SqlitePool,
    name: &str,
    user_id: &str,
    id: &str,
    at: DateTime<Utc>,
) -> Result<Chat> {
    let mut tx = pool.begin().await?;

    let existing = sqlx::query_as::<_, Chat>(
        r#"
        SELECT id, name, user_id, created_at, updated_at
        FROM chats
        WHERE user_id = ? AND name = ?
        ORDER BY updated_at DESC
        LIMIT 1
        "#,
    )
    .bind(user_id)
    .bind(name)
    .fetch_optional(&mut *tx)
    .await?;

    let chat = match existing {
        Some(mut chat) => {
            sqlx::query(
                r#"
                UPDATE chats SET updated_at = ? WHERE id = ?
                "#,
            )
            .bind(at)
            .bind(&chat.id)
            .execute(&mut *tx)
            .await?;

            chat.updated_at = at;
            chat
        }
        None => {
            let chat = Chat {
                id: id.to_string(),
                name: name.to_string(),
                user_id: user_id.to_string(),
                created_at: at,
                updated_at: at,
            };

            sqlx::query(
                r#"
                INSERT INTO chats (id, name, user_id, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(&chat.id)
            .bind(&chat.name)
            .bind(&chat.user_id)
            .bind(chat.created_at)
            .bind(chat.updated_at)
            .execute(&mut *tx)
            .await?;

            chat
        }
    };

    tx.commit().await?;

    Ok(chat)
}

/// Delete a chat and all of its messages. Returns the number of messages
/// removed by the cascade.
pub async fn delete_chat(pool: &SqlitePool, id: &str) -> Result<u64> {
    let mut tx = pool.begin().await?;

    let messages_deleted = sqlx::query(
        r#"
        DELETE FROM messages
        WHERE chat_id = ?
        "#,
    )
    .bind(id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    let chat_deleted = sqlx::query(
        r#"
        DELETE FROM chats
        WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    if chat_deleted == 0 {
        tx.rollback().await?;
        return Err(DatabaseError::not_found("Chat", id));
    }

    tx.commit().await?;

    tracing::debug!(chat_id = %id, messages_deleted, "Deleted chat");
    Ok(messages_deleted)
}

/// Count total chats.
pub async fn count_chats(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM chats
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}
