//! Error types shared across askdoc crates.

use thiserror::Error;

/// Errors produced by core capabilities (model clients, configuration).
#[derive(Debug, Error)]
pub enum CoreError {
    /// A model backend failed: unreachable endpoint, non-success status,
    /// or a response that could not be parsed.
    #[error("Model error: {0}")]
    Model(String),

    /// A caller supplied an argument the capability cannot accept.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
