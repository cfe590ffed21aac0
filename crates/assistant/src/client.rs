//! Assistant client for an OpenAI-compatible completion API.

use reqwest::Client;
use tracing::{debug, warn};

use crate::api_types::{ApiError, ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::config::AssistantConfig;
use crate::error::{AssistantError, Result};

/// A client for the hosted completion API.
///
/// Holds a reqwest client and configuration; constructed once at process
/// start and cloned into request handlers.
#[derive(Debug, Clone)]
pub struct Assistant {
    client: Client,
    config: AssistantConfig,
}

impl Assistant {
    /// Create a new assistant with the given configuration.
    pub fn new(config: AssistantConfig) -> Result<Self> {
        let client = Client::builder().build().map_err(|e| {
            AssistantError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        debug!(model = %config.model, api_url = %config.api_url, "Assistant initialized");

        Ok(Self { client, config })
    }

    /// Create an assistant from environment variables.
    ///
    /// See [`AssistantConfig::from_env`] for the variables read.
    pub fn from_env() -> Result<Self> {
        let config = AssistantConfig::from_env()?;
        Self::new(config)
    }

    /// Request a completion for the given conversation.
    ///
    /// `requested_model` is resolved against the allowlist; an unlisted model
    /// falls back to the configured default. Returns the first choice's
    /// content.
    pub async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        requested_model: Option<&str>,
    ) -> Result<String> {
        let model = self.config.select_model(requested_model);
        let completion = self.chat_completion(messages, model).await?;

        let content = completion
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .map(|s| s.to_string())
            .unwrap_or_else(|| {
                warn!("No content in completion response");
                String::new()
            });

        if let Some(usage) = completion.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "Completion token usage"
            );
        }

        Ok(content)
    }

    /// Make a chat completion request to the API.
    async fn chat_completion(
        &self,
        messages: Vec<ChatMessage>,
        model: &str,
    ) -> Result<ChatCompletionResponse> {
        let url = format!("{}/v1/chat/completions", self.config.api_url);

        let request = ChatCompletionRequest {
            model: model.to_string(),
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        debug!(model = %model, "Sending completion request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AssistantError::Network(format!("Failed to send request: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            // Prefer the structured error message when the body parses.
            if let Ok(api_error) = serde_json::from_str::<ApiError>(&error_text) {
                return Err(AssistantError::Api {
                    status: status.as_u16(),
                    message: api_error.error.message,
                });
            }

            return Err(AssistantError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            AssistantError::Network(format!("Failed to parse response: {}", e))
        })?;

        Ok(completion)
    }
}
