//! Route handlers for the chat API.

pub mod chats;
pub mod completions;
pub mod health;
pub mod messages;
pub mod summaries;
pub mod users;

use axum::routing::{delete, get, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health::health))
        // Accounts and sessions
        .route("/api/signup", post(users::signup))
        .route("/api/login", post(users::login))
        .route("/api/user", get(users::current_user))
        // Chats
        .route("/api/chats", get(chats::list).post(chats::create))
        .route("/api/chats/session", post(chats::upsert_session))
        .route("/api/chats/:id", delete(chats::delete))
        // Messages
        .route(
            "/api/chats/:id/messages",
            get(messages::list).post(messages::create),
        )
        // Sidebar summaries
        .route("/api/summaries", get(summaries::list))
        // Assistant passthrough
        .route("/api/completions", post(completions::create))
}
