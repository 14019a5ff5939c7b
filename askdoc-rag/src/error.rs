//! Error types for the `askdoc-rag` crate.

use thiserror::Error;

/// Errors that can occur while building or querying the pipeline.
#[derive(Debug, Error)]
pub enum RagError {
    /// A query was rejected by local validation before any external call.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// The embedding capability was unreachable or returned malformed
    /// output. Never retried here; the caller owns any retry policy.
    #[error("Embedding unavailable ({provider}): {message}")]
    EmbeddingUnavailable {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// The chat model call failed or returned no answer text.
    #[error("Answer synthesis failed ({model}): {message}")]
    SynthesisFailure {
        /// The model that produced the error.
        model: String,
        /// A description of the failure.
        message: String,
    },

    /// A query arrived before the pipeline finished building.
    #[error("Retrieval pipeline is not ready yet")]
    NotReady,

    /// A corpus file or directory could not be read or parsed.
    #[error("Failed to load '{path}': {message}")]
    LoadError {
        /// The file or directory that failed to load.
        path: String,
        /// A description of the failure.
        message: String,
    },

    /// Index entries carried embeddings of different dimensions.
    #[error("Embedding dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// The dimension established by the first entry.
        expected: usize,
        /// The conflicting dimension.
        found: usize,
    },

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// A convenience result type for pipeline operations.
pub type Result<T> = std::result::Result<T, RagError>;
