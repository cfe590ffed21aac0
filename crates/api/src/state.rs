//! Application state shared across handlers.

use assistant::Assistant;
use database::Database;

/// Shared application state.
///
/// Built once in `main` and cloned into handlers; the store client is
/// injected here rather than hidden behind a global.
#[derive(Clone)]
pub struct AppState {
    /// Database connection.
    pub db: Database,
    /// Completion API client.
    pub assistant: Assistant,
    /// Secret for signing and verifying session tokens.
    pub jwt_secret: String,
}

impl AppState {
    /// Create new application state.
    pub fn new(db: Database, assistant: Assistant, jwt_secret: String) -> Self {
        Self {
            db,
            assistant,
            jwt_secret,
        }
    }
}
