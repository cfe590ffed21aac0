//! HTTP API for the chat service.
//!
//! Serves account signup/login, chat and message CRUD, recency-ordered chat
//! summaries, and a passthrough to the completion API.

mod auth;
mod config;
mod error;
mod routes;
mod state;

use assistant::Assistant;
use database::Database;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;
    info!(addr = %config.addr, "Starting chat API server");

    // Connect to database
    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    // Completion API client
    let assistant = Assistant::from_env()?;

    // Build application state
    let state = AppState::new(db, assistant, config.jwt_secret.clone());

    // Build router
    let app = routes::router()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    info!(addr = %config.addr, "Chat API server listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assistant::AssistantConfig;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn test_app() -> Router {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();

        let assistant = Assistant::new(AssistantConfig {
            api_key: "test-key".to_string(),
            ..AssistantConfig::default()
        })
        .unwrap();

        let state = AppState::new(db, assistant, "test-secret".to_string());
        routes::router().with_state(state)
    }

    fn json_request(method: &str, uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app().await;

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_protected_routes_require_token() {
        let app = test_app().await;

        let response = app
            .oneshot(Request::get("/api/chats").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_signup_rejects_invalid_email() {
        let app = test_app().await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/signup",
                None,
                serde_json::json!({
                    "name": "Alice", "surname": "Lidell",
                    "phone_number": "+15550100",
                    "email": "not-an-email", "password": "hunter2"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_signup_login_chat_flow() {
        let app = test_app().await;

        // Sign up.
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/signup",
                None,
                serde_json::json!({
                    "name": "Alice", "surname": "Lidell",
                    "phone_number": "+15550100",
                    "email": "alice@example.com", "password": "hunter2"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let user = json_body(response).await;
        assert!(user.get("password_hash").is_none());

        // Duplicate email conflicts.
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/signup",
                None,
                serde_json::json!({
                    "name": "Other", "surname": "Alice",
                    "phone_number": "+15550199",
                    "email": "alice@example.com", "password": "hunter2"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        // Wrong password is unauthorized.
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/login",
                None,
                serde_json::json!({"email": "alice@example.com", "password": "wrong"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        // Log in.
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/login",
                None,
                serde_json::json!({"email": "alice@example.com", "password": "hunter2"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let login = json_body(response).await;
        let token = login["token"].as_str().unwrap().to_string();

        // Create a chat.
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/chats",
                Some(&token),
                serde_json::json!({"name": "Trip planning"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let chat = json_body(response).await;
        let chat_id = chat["id"].as_str().unwrap().to_string();

        // A second chat with the same name is fine.
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/chats",
                Some(&token),
                serde_json::json!({"name": "Trip planning"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let duplicate = json_body(response).await;
        let duplicate_id = duplicate["id"].as_str().unwrap().to_string();
        assert_ne!(duplicate_id, chat_id);

        // Append a message.
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/api/chats/{}/messages", chat_id),
                Some(&token),
                serde_json::json!({"role": "user", "content": "Let's go to Kyoto"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        // Summaries show the message as preview.
        let response = app
            .clone()
            .oneshot(json_request(
                "GET",
                "/api/summaries",
                Some(&token),
                serde_json::json!(null),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let summaries = json_body(response).await;
        assert_eq!(summaries[0]["id"], chat_id.as_str());
        assert_eq!(summaries[0]["preview"], "Let's go to Kyoto");

        // Delete the chat; its messages go with it.
        let response = app
            .clone()
            .oneshot(json_request(
                "DELETE",
                &format!("/api/chats/{}", chat_id),
                Some(&token),
                serde_json::json!(null),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let deleted = json_body(response).await;
        assert_eq!(deleted["messages_deleted"], 1);

        // The chat is gone.
        let response = app
            .oneshot(json_request(
                "GET",
                &format!("/api/chats/{}/messages", chat_id),
                Some(&token),
                serde_json::json!(null),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_role_rejected() {
        let app = test_app().await;

        // Sign up and log in inline.
        app.clone()
            .oneshot(json_request(
                "POST",
                "/api/signup",
                None,
                serde_json::json!({
                    "name": "Bob", "surname": "Law",
                    "phone_number": "+15550101",
                    "email": "bob@example.com", "password": "hunter2"
                }),
            ))
            .await
            .unwrap();
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/login",
                None,
                serde_json::json!({"email": "bob@example.com", "password": "hunter2"}),
            ))
            .await
            .unwrap();
        let token = json_body(response).await["token"]
            .as_str()
            .unwrap()
            .to_string();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/chats",
                Some(&token),
                serde_json::json!({"name": "Work"}),
            ))
            .await
            .unwrap();
        let chat_id = json_body(response).await["id"]
            .as_str()
            .unwrap()
            .to_string();

        let response = app
            .oneshot(json_request(
                "POST",
                &format!("/api/chats/{}/messages", chat_id),
                Some(&token),
                serde_json::json!({"role": "moderator", "content": "hello"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
