//! Answer synthesis: render the prompt, invoke the chat model.

use std::sync::Arc;

use askdoc_core::{CompletionRequest, Llm};
use tracing::{debug, error};

use crate::document::SearchResult;
use crate::error::{RagError, Result};

/// The prompt template the answer is synthesized from. `{context}` receives
/// the retrieved chunk texts, `{input}` the user's question.
const ANSWER_TEMPLATE: &str = "Answer the user's\n context: {context}\n input: {input}";

/// Moderate, non-zero temperature: natural phrasing while staying grounded
/// by the supplied context.
const DEFAULT_TEMPERATURE: f32 = 0.7;

const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 500;

/// Renders retrieved chunks and the question into a prompt, invokes the
/// chat model, and extracts the answer text.
pub struct AnswerSynthesizer {
    model: Arc<dyn Llm>,
    temperature: f32,
    max_output_tokens: u32,
}

impl AnswerSynthesizer {
    /// Create a synthesizer with the default sampling parameters.
    pub fn new(model: Arc<dyn Llm>) -> Self {
        Self {
            model,
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }

    /// Override the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Override the maximum number of generated tokens.
    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    /// Render the prompt for a question and its retrieved context.
    ///
    /// Chunks are concatenated in retrieval order (highest similarity
    /// first), separated by blank lines. An empty result set renders an
    /// empty context block; the model is still asked for an answer so
    /// sparse and empty corpora behave like any other.
    fn render_prompt(question: &str, results: &[SearchResult]) -> String {
        let context =
            results.iter().map(|r| r.chunk.text.as_str()).collect::<Vec<_>>().join("\n\n");
        ANSWER_TEMPLATE.replace("{context}", &context).replace("{input}", question)
    }

    /// Synthesize an answer to `question` grounded in `results`.
    ///
    /// Returns the model's answer text, which may be empty: an empty answer
    /// from a successful call is `Ok("")`, not an error. Only a failed call
    /// or a response with no answer text at all becomes
    /// [`RagError::SynthesisFailure`].
    pub async fn synthesize(&self, question: &str, results: &[SearchResult]) -> Result<String> {
        let prompt = Self::render_prompt(question, results);
        debug!(model = self.model.name(), context_chunks = results.len(), "invoking chat model");

        let request = CompletionRequest::new(prompt)
            .with_temperature(self.temperature)
            .with_max_output_tokens(self.max_output_tokens);

        let response = self.model.complete(request).await.map_err(|e| {
            error!(model = self.model.name(), error = %e, "chat model call failed");
            RagError::SynthesisFailure {
                model: self.model.name().to_string(),
                message: e.to_string(),
            }
        })?;

        response.text.ok_or_else(|| RagError::SynthesisFailure {
            model: self.model.name().to_string(),
            message: "response contained no answer text".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use askdoc_core::{CompletionResponse, CoreError};
    use async_trait::async_trait;

    use super::*;
    use crate::document::Chunk;

    /// Captures the request it receives and replies with a canned response.
    struct CapturingLlm {
        reply: std::result::Result<CompletionResponse, String>,
        seen: Mutex<Option<CompletionRequest>>,
    }

    impl CapturingLlm {
        fn replying(text: Option<&str>) -> Self {
            Self {
                reply: Ok(CompletionResponse { text: text.map(str::to_string) }),
                seen: Mutex::new(None),
            }
        }

        fn failing(message: &str) -> Self {
            Self { reply: Err(message.to_string()), seen: Mutex::new(None) }
        }
    }

    #[async_trait]
    impl Llm for CapturingLlm {
        fn name(&self) -> &str {
            "capturing-llm"
        }

        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> std::result::Result<CompletionResponse, CoreError> {
            *self.seen.lock().unwrap() = Some(request);
            self.reply.clone().map_err(CoreError::Model)
        }
    }

    fn result(text: &str) -> SearchResult {
        SearchResult {
            chunk: Chunk {
                id: "c1".to_string(),
                text: text.to_string(),
                offset: 0,
                metadata: HashMap::new(),
                document_id: "doc_1".to_string(),
            },
            score: 0.9,
        }
    }

    #[tokio::test]
    async fn renders_context_and_question_into_template() {
        let model = Arc::new(CapturingLlm::replying(Some("an answer")));
        let synthesizer = AnswerSynthesizer::new(model.clone());

        let answer = synthesizer
            .synthesize("What color is the sky?", &[result("The sky is blue."), result("Grass is green.")])
            .await
            .unwrap();
        assert_eq!(answer, "an answer");

        let request = model.seen.lock().unwrap().clone().unwrap();
        assert_eq!(
            request.prompt,
            "Answer the user's\n context: The sky is blue.\n\nGrass is green.\n input: What color is the sky?"
        );
        assert_eq!(request.temperature, Some(0.7));
        assert_eq!(request.max_output_tokens, Some(500));
    }

    #[tokio::test]
    async fn empty_retrieval_renders_empty_context_block() {
        let model = Arc::new(CapturingLlm::replying(Some("best effort")));
        let synthesizer = AnswerSynthesizer::new(model.clone());

        let answer = synthesizer.synthesize("anything?", &[]).await.unwrap();
        assert_eq!(answer, "best effort");

        let request = model.seen.lock().unwrap().clone().unwrap();
        assert_eq!(request.prompt, "Answer the user's\n context: \n input: anything?");
    }

    #[tokio::test]
    async fn empty_answer_from_successful_call_is_not_an_error() {
        let model = Arc::new(CapturingLlm::replying(Some("")));
        let synthesizer = AnswerSynthesizer::new(model);

        let answer = synthesizer.synthesize("anything?", &[]).await.unwrap();
        assert_eq!(answer, "");
    }

    #[tokio::test]
    async fn missing_answer_text_is_a_synthesis_failure() {
        let model = Arc::new(CapturingLlm::replying(None));
        let synthesizer = AnswerSynthesizer::new(model);

        let err = synthesizer.synthesize("anything?", &[]).await.unwrap_err();
        assert!(matches!(err, RagError::SynthesisFailure { .. }));
    }

    #[tokio::test]
    async fn model_call_failure_is_a_synthesis_failure() {
        let model = Arc::new(CapturingLlm::failing("connection refused"));
        let synthesizer = AnswerSynthesizer::new(model);

        let err = synthesizer.synthesize("anything?", &[]).await.unwrap_err();
        match err {
            RagError::SynthesisFailure { model, message } => {
                assert_eq!(model, "capturing-llm");
                assert!(message.contains("connection refused"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn sampling_overrides_are_forwarded() {
        let model = Arc::new(CapturingLlm::replying(Some("ok")));
        let synthesizer =
            AnswerSynthesizer::new(model.clone()).with_temperature(0.2).with_max_output_tokens(64);

        synthesizer.synthesize("q", &[]).await.unwrap();
        let request = model.seen.lock().unwrap().clone().unwrap();
        assert_eq!(request.temperature, Some(0.2));
        assert_eq!(request.max_output_tokens, Some(64));
    }
}
