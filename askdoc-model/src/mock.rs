//! Mock chat model for tests and demos.

use askdoc_core::{CompletionRequest, CompletionResponse, CoreError, Llm};
use async_trait::async_trait;

enum MockBehavior {
    Reply(String),
    Silent,
    Fail(String),
}

/// A chat model that answers from a script instead of the network.
///
/// # Example
///
/// ```rust,ignore
/// use askdoc_model::MockLlm;
///
/// let model = MockLlm::replying("The sky is blue.");
/// let response = model.complete(request).await?;
/// ```
pub struct MockLlm {
    behavior: MockBehavior,
}

impl MockLlm {
    /// A mock that returns the given text for every request.
    pub fn replying(text: impl Into<String>) -> Self {
        Self { behavior: MockBehavior::Reply(text.into()) }
    }

    /// A mock that completes successfully but produces no answer text.
    pub fn silent() -> Self {
        Self { behavior: MockBehavior::Silent }
    }

    /// A mock whose every call fails with the given message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self { behavior: MockBehavior::Fail(message.into()) }
    }
}

#[async_trait]
impl Llm for MockLlm {
    fn name(&self) -> &str {
        "mock-llm"
    }

    async fn complete(
        &self,
        _request: CompletionRequest,
    ) -> Result<CompletionResponse, CoreError> {
        match &self.behavior {
            MockBehavior::Reply(text) => Ok(CompletionResponse { text: Some(text.clone()) }),
            MockBehavior::Silent => Ok(CompletionResponse { text: None }),
            MockBehavior::Fail(message) => Err(CoreError::Model(message.clone())),
        }
    }
}
