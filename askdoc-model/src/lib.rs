//! # askdoc-model
//!
//! Chat model backends for askdoc.
//!
//! - [`OpenAIChatClient`] — OpenAI and OpenAI-compatible chat completion
//!   APIs over HTTP
//! - [`MockLlm`] — canned responses for tests and demos
//!
//! All backends implement [`askdoc_core::Llm`].

pub mod mock;
pub mod openai;

pub use mock::MockLlm;
pub use openai::{OpenAIChatClient, OpenAIChatConfig};
