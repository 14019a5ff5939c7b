//! Document chunking.
//!
//! Splits raw documents into overlapping segments sized for the embedding
//! model's input limits. [`FixedSizeChunker`] is the only strategy this
//! service needs; alternatives plug in through the [`Chunker`] trait.

use crate::document::{Chunk, Document};

/// A strategy for splitting documents into chunks.
///
/// Implementations are pure functions of the document text: no I/O, no
/// failure modes.
pub trait Chunker: Send + Sync {
    /// Split a document into chunks.
    ///
    /// Returns an empty `Vec` if the document has empty text.
    fn chunk(&self, document: &Document) -> Vec<Chunk>;
}

/// Splits text into fixed-size chunks by character count with overlap.
///
/// A window of `chunk_size` characters slides across the text, advancing by
/// `chunk_size - chunk_overlap` each step, and stops once a window reaches
/// the end of the text. The final chunk may be shorter than `chunk_size`;
/// every character of the document lands in at least one chunk. For a text
/// of `L` characters with `L > chunk_size` this yields exactly
/// `ceil((L - overlap) / (chunk_size - overlap))` chunks, otherwise one.
///
/// Chunk IDs are generated as `{document_id}_{chunk_index}`. Each chunk
/// inherits the parent document's metadata plus a `chunk_index` field and
/// records its character offset.
#[derive(Debug, Clone)]
pub struct FixedSizeChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl FixedSizeChunker {
    /// Create a new `FixedSizeChunker`.
    ///
    /// # Arguments
    ///
    /// * `chunk_size` — maximum number of characters per chunk
    /// * `chunk_overlap` — number of overlapping characters between consecutive chunks
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self { chunk_size, chunk_overlap }
    }
}

impl Chunker for FixedSizeChunker {
    fn chunk(&self, document: &Document) -> Vec<Chunk> {
        if document.text.is_empty() {
            return Vec::new();
        }

        // Byte offset of every character boundary, including the end of the
        // text, so windows measured in characters slice valid UTF-8.
        let boundaries: Vec<usize> = document
            .text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(document.text.len()))
            .collect();
        let char_count = boundaries.len() - 1;

        let mut chunks = Vec::new();
        let mut start = 0;
        let mut chunk_index = 0;
        let step = self.chunk_size.saturating_sub(self.chunk_overlap);

        loop {
            let end = (start + self.chunk_size).min(char_count);
            let chunk_text = &document.text[boundaries[start]..boundaries[end]];

            let mut metadata = document.metadata.clone();
            metadata.insert("chunk_index".to_string(), chunk_index.to_string());

            chunks.push(Chunk {
                id: format!("{}_{chunk_index}", document.id),
                text: chunk_text.to_string(),
                offset: start,
                metadata,
                document_id: document.id.clone(),
            });

            // Stop once a window reaches the end; a further window would
            // only repeat text already covered.
            if end == char_count || step == 0 {
                break;
            }
            chunk_index += 1;
            start += step;
        }

        chunks
    }
}
