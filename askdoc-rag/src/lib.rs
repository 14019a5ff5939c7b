//! # askdoc-rag
//!
//! The retrieval-augmented answering pipeline behind askdoc.
//!
//! At startup a [`PipelineBuilder`] runs the one-shot ingest sequence —
//! load the corpus, chunk every document, embed every chunk, build an
//! immutable [`VectorIndex`] — and produces a [`QueryPipeline`]. Per query
//! the pipeline embeds the question, retrieves the top-k most similar
//! chunks by cosine similarity, and feeds them plus the question to a chat
//! model to synthesize a grounded answer.
//!
//! The index is read-only after build, so concurrent queries need no
//! locking. Embedding and chat backends sit behind the
//! [`EmbeddingProvider`] and [`askdoc_core::Llm`] traits.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use askdoc_rag::{PipelineBuilder, RagConfig, FixedSizeChunker, DirectoryLoader, CsvLoader};
//!
//! let config = RagConfig::builder().chunk_size(200).chunk_overlap(20).top_k(5).build()?;
//! let loader = DirectoryLoader::new("./data").with_loader("csv", Arc::new(CsvLoader));
//!
//! let pipeline = PipelineBuilder::new()
//!     .config(config)
//!     .embedding_provider(Arc::new(embedder))
//!     .llm(Arc::new(model))
//!     .chunker(Arc::new(FixedSizeChunker::new(200, 20)))
//!     .corpus(Arc::new(loader))
//!     .build()
//!     .await?;
//!
//! let answer = pipeline.answer("What color is the sky?").await?;
//! ```

pub mod chunking;
pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod index;
pub mod loader;
pub mod openai;
pub mod pipeline;
pub mod retriever;
pub mod synth;

pub use chunking::{Chunker, FixedSizeChunker};
pub use config::RagConfig;
pub use document::{Chunk, Document, SearchResult};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use index::{IndexEntry, VectorIndex};
pub use loader::{CorpusSource, CsvLoader, DirectoryLoader, DocumentLoader, StaticCorpus, TextLoader};
pub use openai::OpenAIEmbeddingProvider;
pub use pipeline::{PipelineBuilder, QueryPipeline};
pub use retriever::Retriever;
pub use synth::AnswerSynthesizer;
