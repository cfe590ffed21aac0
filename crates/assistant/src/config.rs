//! Configuration for the assistant client.

use std::env;

use crate::error::AssistantError;

/// Configuration for the assistant client.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// Completion API base URL.
    pub api_url: String,

    /// API key for authentication.
    pub api_key: String,

    /// Default model, used when a request names no model or an unlisted one.
    pub model: String,

    /// Models a caller may select. The default model is always accepted.
    pub allowed_models: Vec<String>,

    /// Maximum tokens for response.
    pub max_tokens: Option<u32>,

    /// Temperature for generation (0.0 - 2.0).
    pub temperature: Option<f32>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com".to_string(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            allowed_models: vec!["gpt-4o-mini".to_string()],
            max_tokens: Some(500),
            temperature: None,
        }
    }
}

impl AssistantConfig {
    /// Create configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `ASSISTANT_API_KEY` | API key for authentication | (required) |
    /// | `ASSISTANT_API_URL` | Completion API base URL | `https://api.openai.com` |
    /// | `ASSISTANT_MODEL` | Default model name | `gpt-4o-mini` |
    /// | `ASSISTANT_ALLOWED_MODELS` | Comma-separated model allowlist | the default model |
    /// | `ASSISTANT_MAX_TOKENS` | Max response tokens | `500` |
    /// | `ASSISTANT_TEMPERATURE` | Sampling temperature | (unset) |
    pub fn from_env() -> Result<Self, AssistantError> {
        let api_key = env::var("ASSISTANT_API_KEY")
            .map_err(|_| AssistantError::Configuration("ASSISTANT_API_KEY not set".to_string()))?;

        let api_url = env::var("ASSISTANT_API_URL")
            .unwrap_or_else(|_| "https://api.openai.com".to_string());

        let model = env::var("ASSISTANT_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        let allowed_models = env::var("ASSISTANT_ALLOWED_MODELS")
            .map(|v| {
                v.split(',')
                    .map(|m| m.trim().to_string())
                    .filter(|m| !m.is_empty())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_else(|_| vec![model.clone()]);

        let max_tokens = env::var("ASSISTANT_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(500));

        let temperature = env::var("ASSISTANT_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok());

        Ok(Self {
            api_url,
            api_key,
            model,
            allowed_models,
            max_tokens,
            temperature,
        })
    }

    /// Resolve a caller-requested model against the allowlist.
    ///
    /// Returns the requested model when it is listed (or is the default),
    /// otherwise falls back to the configured default.
    pub fn select_model(&self, requested: Option<&str>) -> &str {
        let Some(m) = requested else {
            return &self.model;
        };

        if m == self.model {
            return &self.model;
        }

        if let Some(listed) = self.allowed_models.iter().find(|a| a.as_str() == m) {
            return listed;
        }

        tracing::warn!(requested = %m, fallback = %self.model, "Unrecognized model, using default");
        &self.model
    }
}
