//! Chat CRUD routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use database::{chat, models::Chat, validation, DatabaseError};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::Result;
use crate::state::AppState;

/// Request to create or upsert a chat.
#[derive(Deserialize)]
pub struct ChatRequest {
    pub name: String,
}

/// Result of deleting a chat.
#[derive(Serialize)]
pub struct DeleteResponse {
    pub chat_id: String,
    pub messages_deleted: u64,
}

/// Load a chat and confirm the caller owns it.
///
/// A chat owned by someone else reports NotFound, so the endpoint leaks no
/// information about other users' chats.
pub(super) async fn owned_chat(state: &AppState, auth: &AuthUser, id: &str) -> Result<Chat> {
    let found = chat::get_chat(state.db.pool(), id).await?;
    if found.user_id != auth.user_id {
        return Err(DatabaseError::not_found("Chat", id).into());
    }
    Ok(found)
}

/// List the caller's chats, most recently updated first.
pub async fn list(State(state): State<AppState>, auth: AuthUser) -> Result<Json<Vec<Chat>>> {
    let chats = chat::list_chats(state.db.pool(), &auth.user_id).await?;
    Ok(Json(chats))
}

/// Create a new chat.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ChatRequest>,
) -> Result<(StatusCode, Json<Chat>)> {
    validation::validate_chat_name(&req.name)?;

    let now = Utc::now();
    let new_chat = Chat {
        id: Uuid::new_v4().to_string(),
        name: req.name.trim().to_string(),
        user_id: auth.user_id.clone(),
        created_at: now,
        updated_at: now,
    };

    chat::create_chat(state.db.pool(), &new_chat).await?;
    info!(chat_id = %new_chat.id, "Created chat");

    Ok((StatusCode::CREATED, Json(new_chat)))
}

/// Create a chat by name or bump its updated_at if the caller already has
/// one with that name. Used when a chat is started implicitly by sending a
/// first message.
pub async fn upsert_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ChatRequest>,
) -> Result<Json<Chat>> {
    validation::validate_chat_name(&req.name)?;

    let stored = chat::upsert_chat(
        state.db.pool(),
        req.name.trim(),
        &auth.user_id,
        &Uuid::new_v4().to_string(),
        Utc::now(),
    )
    .await?;

    Ok(Json(stored))
}

/// Delete a chat and all of its messages.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    owned_chat(&state, &auth, &id).await?;

    let messages_deleted = chat::delete_chat(state.db.pool(), &id).await?;
    info!(chat_id = %id, messages_deleted, "Deleted chat");

    Ok(Json(DeleteResponse {
        chat_id: id,
        messages_deleted,
    }))
}
