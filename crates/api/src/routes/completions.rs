//! Assistant completion passthrough.

use assistant::ChatMessage;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::AuthUser;
use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Request for an assistant reply.
#[derive(Deserialize)]
pub struct CompletionRequest {
    pub messages: Vec<IncomingMessage>,
    #[serde(default)]
    pub model: Option<String>,
}

/// One conversation message supplied by the client.
#[derive(Deserialize)]
pub struct IncomingMessage {
    pub role: String,
    pub content: String,
}

/// The assistant's reply.
#[derive(Serialize)]
pub struct CompletionResponse {
    pub message: String,
}

/// Forward the conversation to the completion API and return the reply.
pub async fn create(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(req): Json<CompletionRequest>,
) -> Result<Json<CompletionResponse>> {
    if req.messages.is_empty() {
        return Err(ApiError::BadRequest("messages must not be empty".to_string()));
    }

    let messages: Vec<ChatMessage> = req
        .messages
        .into_iter()
        .map(|m| ChatMessage {
            role: m.role,
            content: m.content,
        })
        .collect();

    let message = state
        .assistant
        .complete(messages, req.model.as_deref())
        .await?;

    Ok(Json(CompletionResponse { message }))
}
