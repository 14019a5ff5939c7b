//! OpenAI chat completion backend.
//!
//! Targets the `/v1/chat/completions` endpoint of OpenAI or any
//! OpenAI-compatible API (set a custom base URL via
//! [`OpenAIChatConfig::with_base_url`]).

mod client;
mod config;

pub use client::OpenAIChatClient;
pub use config::OpenAIChatConfig;
