//! Client for the hosted language-model completion API.
//!
//! Wraps an OpenAI-compatible `/v1/chat/completions` endpoint:
//!
//! - [`Assistant`] - the HTTP client, configured once and cloned into handlers
//! - [`AssistantConfig`] - environment-driven configuration with a model allowlist
//! - [`ChatMessage`] - role-tagged message passed to the API
//! - [`AssistantError`] - error types for configuration, network, and API failures

mod api_types;
mod client;
mod config;
mod error;

pub use api_types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
pub use client::Assistant;
pub use config::AssistantConfig;
pub use error::{AssistantError, Result};
