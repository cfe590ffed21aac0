//! Sidebar chat-list summaries.
//!
//! Fetches the caller's chats and messages, runs the pure recency
//! aggregation from `database::summary`, and truncates previews for display.

use axum::extract::State;
use axum::Json;
use database::{chat, message, models::ChatSummary, summarize};

use crate::auth::AuthUser;
use crate::error::Result;
use crate::state::AppState;

/// Preview length shown in the chat list.
const PREVIEW_MAX_CHARS: usize = 50;

/// List the caller's chats as summaries, most recent activity first.
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<ChatSummary>>> {
    let chats = chat::list_chats(state.db.pool(), &auth.user_id).await?;
    let messages = message::list_messages_for_user(state.db.pool(), &auth.user_id).await?;

    let summaries = summarize(&chats, &messages)
        .into_iter()
        .map(|mut summary| {
            summary.preview = truncate_preview(&summary.preview, PREVIEW_MAX_CHARS);
            summary
        })
        .collect();

    Ok(Json(summaries))
}

/// Truncate a preview to `max_chars` characters, appending an ellipsis when
/// anything was cut. Truncation is purely presentational; the aggregation
/// itself always carries full content.
fn truncate_preview(content: &str, max_chars: usize) -> String {
    let mut chars = content.chars();
    let truncated: String = chars.by_ref().take(max_chars).collect();

    if chars.next().is_some() {
        format!("{}...", truncated)
    } else {
        truncated
    }
}
