//! The completion-model trait implemented by chat backends.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A single completion request: one prompt, optional sampling parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletionRequest {
    /// The fully rendered prompt text.
    pub prompt: String,
    /// Sampling temperature. `None` leaves the backend default.
    pub temperature: Option<f32>,
    /// Upper bound on generated tokens. `None` leaves the backend default.
    pub max_output_tokens: Option<u32>,
}

impl CompletionRequest {
    /// Create a request with backend-default sampling parameters.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self { prompt: prompt.into(), temperature: None, max_output_tokens: None }
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the maximum number of generated tokens.
    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }
}

/// The backend's answer to a [`CompletionRequest`].
///
/// `text` is `None` when the backend completed the call but produced no
/// message content. Callers that care about the difference between "the
/// call failed" and "the model said nothing" must check this field rather
/// than collapsing both into one fallback.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletionResponse {
    /// The generated text, if the backend returned any.
    pub text: Option<String>,
}

/// A chat/completion model behind a narrow async interface.
///
/// Implementations wrap a concrete provider (OpenAI-compatible HTTP APIs,
/// mocks for tests). One call, one response; token streaming is out of
/// scope for this service.
#[async_trait]
pub trait Llm: Send + Sync {
    /// A human-readable backend identifier (model name), used in logs and
    /// error messages.
    fn name(&self) -> &str;

    /// Run a single completion.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, CoreError>;
}
