//! Message persistence.
//!
//! Messages are immutable: they are created once and only removed by the
//! chat-deletion cascade in [`crate::chat::delete_chat`].

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::Message;

/// Append a message to a chat and bump the chat's updated_at in the same
/// transaction. Fails with [`DatabaseError::NotFound`] when the chat does
/// not exist.
pub async fn create_message(pool: &SqlitePool, message: &Message) -> Result<()> {
    let mut tx = pool.begin().await?;

    let chat_exists = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM chats WHERE id = ?
        "#,
    )
    .bind(&message.chat_id)
    .fetch_one(&mut *tx)
    .await?;

    if chat_exists == 0 {
        return Err(DatabaseError::not_found("Chat", &message.chat_id));
    }

    sqlx::query(
        r#"
        INSERT INTO messages (id, chat_id, role, content, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&message.id)
    .bind(&message.chat_id)
    .bind(&message.role)
    .bind(&message.content)
    .bind(message.created_at)
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        UPDATE chats SET updated_at = ? WHERE id = ?
        "#,
    )
    .bind(message.created_at)
    .bind(&message.chat_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(())
}

/// List all messages in a chat, oldest first.
pub async fn list_messages(pool: &SqlitePool, chat_id: &str) -> Result<Vec<Message>> {
    let messages = sqlx::query_as::<_, Message>(
        r#"
        SELECT id, chat_id, role, content, created_at
        FROM messages
        WHERE chat_id = ?
        ORDER BY created_at ASC
        "#,
    )
    .bind(chat_id)
    .fetch_all(pool)
    .await?;

    Ok(messages)
}

/// List all messages across every chat a user owns, newest first.
///
/// This is the second input to [`crate::summary::summarize`]: the caller
/// fetches the user's chats and this joined message set, then aggregates.
pub async fn list_messages_for_user(pool: &SqlitePool, user_id: &str) -> Result<Vec<Message>> {
    let messages = sqlx::query_as::<_, Message>(
        r#"
        SELECT m.id, m.chat_id, m.role, m.content, m.created_at
        FROM messages m
        JOIN chats c ON c.id = m.chat_id
        WHERE c.user_id = ?
        ORDER BY m.created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(messages)
}

/// Count total messages.
pub async fn count_messages(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM messages
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}
