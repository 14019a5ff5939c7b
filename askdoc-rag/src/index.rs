//! Immutable in-memory vector index with cosine-similarity search.
//!
//! The index is built once from the fully embedded corpus and never
//! mutated afterwards, so concurrent queries read it without locking.
//! Search is an exhaustive linear scan — O(n·d) per query — which is the
//! right trade-off for a corpus bounded by one ingest pass.

use std::cmp::Ordering;

use crate::document::{Chunk, SearchResult};
use crate::error::{RagError, Result};

/// An embedding vector paired with the chunk it was computed from.
///
/// Entries are owned exclusively by the [`VectorIndex`]: appended during
/// build, never mutated.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    /// The chunk's embedding vector.
    pub embedding: Vec<f32>,
    /// The chunk the embedding was computed from.
    pub chunk: Chunk,
}

/// Compute cosine similarity between two vectors.
///
/// The dot product of the vectors normalized by their magnitudes; direction
/// carries the semantics for the embedding models this service targets,
/// magnitude does not. Returns 0.0 if either vector has zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// An immutable in-memory vector index.
///
/// Built once via [`VectorIndex::build`]; queried any number of times via
/// [`VectorIndex::query`]. Entries keep their insertion order, which also
/// breaks similarity ties deterministically.
#[derive(Debug, Default)]
pub struct VectorIndex {
    entries: Vec<IndexEntry>,
    dimensions: usize,
}

impl VectorIndex {
    /// Construct an index from embedded entries. O(n).
    ///
    /// The dimension of the first entry fixes the index dimension; an empty
    /// entry set builds an empty index that answers every query with an
    /// empty result.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::DimensionMismatch`] if any entry's embedding
    /// differs in dimension from the first.
    pub fn build(entries: Vec<IndexEntry>) -> Result<Self> {
        let dimensions = entries.first().map(|e| e.embedding.len()).unwrap_or(0);
        for entry in &entries {
            if entry.embedding.len() != dimensions {
                return Err(RagError::DimensionMismatch {
                    expected: dimensions,
                    found: entry.embedding.len(),
                });
            }
        }
        Ok(Self { entries, dimensions })
    }

    /// Return the `k` entries most similar to `embedding`, ordered by
    /// descending cosine similarity. Ties keep insertion order. `k` larger
    /// than the entry count returns all entries; an empty index returns an
    /// empty result.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::InvalidQuery`] if `k == 0`.
    pub fn query(&self, embedding: &[f32], k: usize) -> Result<Vec<SearchResult>> {
        if k == 0 {
            return Err(RagError::InvalidQuery("k must be greater than zero".to_string()));
        }

        let mut scored: Vec<SearchResult> = self
            .entries
            .iter()
            .map(|entry| SearchResult {
                chunk: entry.chunk.clone(),
                score: cosine_similarity(&entry.embedding, embedding),
            })
            .collect();

        // Stable sort keeps insertion order for equal scores.
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scored.truncate(k);
        Ok(scored)
    }

    /// Number of entries in the index.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The embedding dimension shared by all entries (0 for an empty index).
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }
}
