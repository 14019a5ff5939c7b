//! Configuration for the OpenAI chat client.

use askdoc_core::CoreError;

/// The default OpenAI API base URL.
pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

const DEFAULT_MODEL: &str = "gpt-4";

/// Configuration for an [`OpenAIChatClient`](super::OpenAIChatClient).
#[derive(Debug, Clone)]
pub struct OpenAIChatConfig {
    /// The API key used for bearer authentication.
    pub api_key: String,
    /// The model name sent with each request.
    pub model: String,
    /// The API base URL (override for OpenAI-compatible backends).
    pub base_url: String,
}

impl OpenAIChatConfig {
    /// Create a configuration for the given API key and the default model.
    pub fn new(api_key: impl Into<String>) -> Result<Self, CoreError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(CoreError::InvalidArgument("API key must not be empty".to_string()));
        }
        Ok(Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: OPENAI_API_BASE.to_string(),
        })
    }

    /// Create a configuration from the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self, CoreError> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            CoreError::InvalidArgument("OPENAI_API_KEY environment variable not set".to_string())
        })?;
        Self::new(api_key)
    }

    /// Set the model name (e.g. `gpt-4o-mini`).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the API base URL for an OpenAI-compatible backend.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}
