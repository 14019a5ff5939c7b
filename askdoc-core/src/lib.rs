//! # askdoc-core
//!
//! Shared seams for the askdoc service: the [`Llm`] completion trait that
//! chat model backends implement, and the [`CoreError`] type they fail with.
//!
//! Backends live in `askdoc-model`; the retrieval pipeline in `askdoc-rag`
//! consumes any `Arc<dyn Llm>` without knowing which backend it got.

mod error;
mod llm;

pub use error::CoreError;
pub use llm::{CompletionRequest, CompletionResponse, Llm};
