//! Message routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use database::{
    message,
    models::{Chat, Message},
    validation::{self, MessageRole},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::Result;
use crate::routes::chats::owned_chat;
use crate::state::AppState;

/// Request to append a message to a chat.
#[derive(Deserialize)]
pub struct MessageRequest {
    pub role: String,
    pub content: String,
}

/// A chat with its full message history.
#[derive(Serialize)]
pub struct ChatMessagesResponse {
    pub chat: Chat,
    pub messages: Vec<Message>,
}

/// Return a chat and its messages, oldest first.
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ChatMessagesResponse>> {
    let chat = owned_chat(&state, &auth, &id).await?;
    let messages = message::list_messages(state.db.pool(), &id).await?;

    Ok(Json(ChatMessagesResponse { chat, messages }))
}

/// Append a message to a chat, bumping the chat's updated_at.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<MessageRequest>,
) -> Result<(StatusCode, Json<Message>)> {
    let role: MessageRole = req.role.parse()?;
    validation::validate_message_content(&req.content)?;

    owned_chat(&state, &auth, &id).await?;

    let new_message = Message {
        id: Uuid::new_v4().to_string(),
        chat_id: id,
        role: role.as_str().to_string(),
        content: req.content,
        created_at: Utc::now(),
    };

    message::create_message(state.db.pool(), &new_message).await?;

    Ok((StatusCode::CREATED, Json(new_message)))
}
