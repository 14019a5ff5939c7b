//! Embedding provider trait for generating vector embeddings from text.

use async_trait::async_trait;

use crate::error::Result;

/// A provider that maps text to fixed-dimension embedding vectors.
///
/// Implementations wrap a specific embedding backend behind a unified async
/// interface. All vectors produced by one provider instance share the same
/// dimension; mixing vectors from providers of different dimensions in one
/// index is rejected at index build time.
///
/// Failures surface as [`RagError::EmbeddingUnavailable`] and are never
/// retried by the provider — retry and backoff policy belongs to the
/// caller, since embedding calls are metered and rate limited.
///
/// [`RagError::EmbeddingUnavailable`]: crate::error::RagError::EmbeddingUnavailable
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding vector for a single text input.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embedding vectors for a batch of text inputs, preserving
    /// input order.
    ///
    /// The default implementation calls [`embed`](EmbeddingProvider::embed)
    /// sequentially for each input. Override this method if the backend
    /// supports native batch embedding for better throughput.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text).await?);
        }
        Ok(results)
    }

    /// Return the dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;
}
