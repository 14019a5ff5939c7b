//! Query-time retrieval: embed the question, search the index.

use std::sync::Arc;

use tracing::{debug, error};

use crate::document::SearchResult;
use crate::embedding::EmbeddingProvider;
use crate::error::Result;
use crate::index::VectorIndex;

/// Embeds a query and delegates to the [`VectorIndex`] for top-k lookup.
///
/// Each query is embedded independently; there is no cache of query
/// embeddings, since query volume is assumed low relative to corpus size.
pub struct Retriever {
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<VectorIndex>,
}

impl Retriever {
    /// Create a retriever over a built index.
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, index: Arc<VectorIndex>) -> Self {
        Self { embedder, index }
    }

    /// Return a reference to the underlying index.
    pub fn index(&self) -> &Arc<VectorIndex> {
        &self.index
    }

    /// Retrieve the `k` chunks most similar to `query`.
    ///
    /// # Errors
    ///
    /// Propagates [`RagError::EmbeddingUnavailable`] from the embedder and
    /// [`RagError::InvalidQuery`] for `k == 0`.
    ///
    /// [`RagError::EmbeddingUnavailable`]: crate::error::RagError::EmbeddingUnavailable
    /// [`RagError::InvalidQuery`]: crate::error::RagError::InvalidQuery
    pub async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<SearchResult>> {
        let query_embedding = self.embedder.embed(query).await.map_err(|e| {
            error!(error = %e, "query embedding failed");
            e
        })?;

        let results = self.index.query(&query_embedding, k)?;
        debug!(query_len = query.len(), result_count = results.len(), "retrieved chunks");
        Ok(results)
    }
}
