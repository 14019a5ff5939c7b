//! Pipeline construction and query orchestration.
//!
//! [`PipelineBuilder::build`] runs the one-shot startup sequence — load the
//! corpus, chunk, embed, build the index — and produces an immutable
//! [`QueryPipeline`]. The build runs once per process lifetime; on failure
//! the error propagates to the spawner and the process stays not-ready
//! (restart is the recovery path, there is no automatic rebuild).

use std::sync::Arc;

use askdoc_core::Llm;
use tracing::{error, info};

use crate::chunking::Chunker;
use crate::config::RagConfig;
use crate::document::{Chunk, SearchResult};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::index::{IndexEntry, VectorIndex};
use crate::loader::CorpusSource;
use crate::retriever::Retriever;
use crate::synth::AnswerSynthesizer;

/// A ready-to-query pipeline: retriever plus synthesizer over a built index.
///
/// Immutable after construction; concurrent queries share it freely.
pub struct QueryPipeline {
    retriever: Retriever,
    synthesizer: AnswerSynthesizer,
    top_k: usize,
}

impl std::fmt::Debug for QueryPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryPipeline")
            .field("top_k", &self.top_k)
            .finish_non_exhaustive()
    }
}

impl QueryPipeline {
    /// Retrieve the configured top-k chunks for `input`.
    pub async fn retrieve(&self, input: &str) -> Result<Vec<SearchResult>> {
        self.retriever.retrieve(input, self.top_k).await
    }

    /// Answer `input`: retrieve the top-k chunks, then synthesize an answer
    /// grounded in them. An empty index yields an empty context, not an
    /// error.
    pub async fn answer(&self, input: &str) -> Result<String> {
        let results = self.retrieve(input).await?;
        self.synthesizer.synthesize(input, &results).await
    }

    /// Number of entries in the underlying index.
    pub fn entry_count(&self) -> usize {
        self.retriever.index().len()
    }

    /// The configured number of results per query.
    pub fn top_k(&self) -> usize {
        self.top_k
    }
}

/// Builder for the one-time pipeline construction.
///
/// All fields are required. [`build()`](PipelineBuilder::build) is async and
/// long-running: it performs corpus I/O and one embedding call per batch.
///
/// # Example
///
/// ```rust,ignore
/// let pipeline = PipelineBuilder::new()
///     .config(config)
///     .embedding_provider(Arc::new(embedder))
///     .llm(Arc::new(model))
///     .chunker(Arc::new(FixedSizeChunker::new(200, 20)))
///     .corpus(Arc::new(loader))
///     .build()
///     .await?;
/// ```
#[derive(Default)]
pub struct PipelineBuilder {
    config: Option<RagConfig>,
    embedding_provider: Option<Arc<dyn EmbeddingProvider>>,
    llm: Option<Arc<dyn Llm>>,
    chunker: Option<Arc<dyn Chunker>>,
    corpus: Option<Arc<dyn CorpusSource>>,
}

impl PipelineBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pipeline configuration.
    pub fn config(mut self, config: RagConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedding provider.
    pub fn embedding_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedding_provider = Some(provider);
        self
    }

    /// Set the chat model used for answer synthesis.
    pub fn llm(mut self, llm: Arc<dyn Llm>) -> Self {
        self.llm = Some(llm);
        self
    }

    /// Set the document chunker.
    pub fn chunker(mut self, chunker: Arc<dyn Chunker>) -> Self {
        self.chunker = Some(chunker);
        self
    }

    /// Set the corpus source.
    pub fn corpus(mut self, corpus: Arc<dyn CorpusSource>) -> Self {
        self.corpus = Some(corpus);
        self
    }

    /// Run the startup sequence: load corpus → chunk → embed → build index.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] for missing builder fields, and
    /// propagates [`RagError::LoadError`], [`RagError::EmbeddingUnavailable`],
    /// and [`RagError::DimensionMismatch`] from the respective stages.
    pub async fn build(self) -> Result<QueryPipeline> {
        let config =
            self.config.ok_or_else(|| RagError::ConfigError("config is required".to_string()))?;
        let embedding_provider = self
            .embedding_provider
            .ok_or_else(|| RagError::ConfigError("embedding_provider is required".to_string()))?;
        let llm = self.llm.ok_or_else(|| RagError::ConfigError("llm is required".to_string()))?;
        let chunker =
            self.chunker.ok_or_else(|| RagError::ConfigError("chunker is required".to_string()))?;
        let corpus =
            self.corpus.ok_or_else(|| RagError::ConfigError("corpus is required".to_string()))?;

        let documents = corpus.load().await?;

        let chunks: Vec<Chunk> =
            documents.iter().flat_map(|document| chunker.chunk(document)).collect();
        info!(document_count = documents.len(), chunk_count = chunks.len(), "corpus chunked");

        let entries = if chunks.is_empty() {
            Vec::new()
        } else {
            let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
            let embeddings = embedding_provider.embed_batch(&texts).await.map_err(|e| {
                error!(error = %e, "embedding failed during index build");
                e
            })?;

            if embeddings.len() != chunks.len() {
                return Err(RagError::EmbeddingUnavailable {
                    provider: "embedder".to_string(),
                    message: format!(
                        "expected {} embeddings, got {}",
                        chunks.len(),
                        embeddings.len()
                    ),
                });
            }

            chunks
                .into_iter()
                .zip(embeddings)
                .map(|(chunk, embedding)| IndexEntry { embedding, chunk })
                .collect()
        };

        let index = Arc::new(VectorIndex::build(entries)?);
        info!(
            entry_count = index.len(),
            dimensions = index.dimensions(),
            top_k = config.top_k,
            "vector index built"
        );

        Ok(QueryPipeline {
            retriever: Retriever::new(embedding_provider, index),
            synthesizer: AnswerSynthesizer::new(llm),
            top_k: config.top_k,
        })
    }
}
