//! SQLite persistence layer for the chat service.
//!
//! This crate provides async database operations for users, chats, and
//! messages using SQLx with SQLite, plus the pure recency aggregation that
//! turns a user's chats and messages into an ordered summary list.
//!
//! # Example
//!
//! ```no_run
//! use chrono::Utc;
//! use database::{chat, models::Chat, Database};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:chat.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     let now = Utc::now();
//!     let new_chat = Chat {
//!         id: "5a8df0cd-95a9-4c0c-9b0f-1f3de9f3e9aa".to_string(),
//!         name: "Trip planning".to_string(),
//!         user_id: "c27fb365-0c84-4cf2-8555-814bb065e448".to_string(),
//!         created_at: now,
//!         updated_at: now,
//!     };
//!     chat::create_chat(db.pool(), &new_chat).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod chat;
pub mod error;
pub mod message;
pub mod models;
pub mod summary;
pub mod user;
pub mod validation;

pub use error::{DatabaseError, Result};
pub use models::{Chat, ChatSummary, Message, User};
pub use summary::summarize;
pub use validation::{MessageRole, ValidationError};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
///
/// Constructed once at process start, cloned into request handlers, and
/// closed at shutdown. Never stashed in a global.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    const DEFAULT_POOL_SIZE: u32 = 20;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist, or
    /// `sqlite::memory:` for tests.
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!(
            "Connected to database: {} (pool size: {})",
            url,
            pool_size
        );

        Ok(Self { pool })
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
