//! The one-shot startup task that builds and publishes the pipeline.

use std::sync::Arc;

use askdoc_model::{OpenAIChatClient, OpenAIChatConfig};
use askdoc_rag::{
    CsvLoader, DirectoryLoader, FixedSizeChunker, OpenAIEmbeddingProvider, PipelineBuilder,
    QueryPipeline, RagConfig, RagError, Result, TextLoader,
};
use tracing::{error, info};

use crate::config::ServerConfig;
use crate::state::PipelineHandle;

/// Construct the pipeline from the server configuration: OpenAI providers
/// from the environment, a directory corpus with CSV and plain-text
/// loaders, and a fixed-size chunker.
async fn build_pipeline(config: &ServerConfig) -> Result<QueryPipeline> {
    // Run env-sourced parameters through the validating builder.
    let rag_config = RagConfig::builder()
        .chunk_size(config.rag.chunk_size)
        .chunk_overlap(config.rag.chunk_overlap)
        .top_k(config.rag.top_k)
        .build()?;

    let embedder =
        OpenAIEmbeddingProvider::from_env()?.with_model(config.embedding_model.clone());
    let chat_config = OpenAIChatConfig::from_env()
        .map_err(|e| RagError::ConfigError(e.to_string()))?
        .with_model(config.chat_model.clone());

    let loader = DirectoryLoader::new(&config.corpus_dir)
        .with_loader("csv", Arc::new(CsvLoader))
        .with_loader("txt", Arc::new(TextLoader))
        .with_loader("md", Arc::new(TextLoader));

    PipelineBuilder::new()
        .config(rag_config.clone())
        .embedding_provider(Arc::new(embedder))
        .llm(Arc::new(OpenAIChatClient::new(chat_config)))
        .chunker(Arc::new(FixedSizeChunker::new(
            rag_config.chunk_size,
            rag_config.chunk_overlap,
        )))
        .corpus(Arc::new(loader))
        .build()
        .await
}

/// Spawn the build task. Runs exactly once per process lifetime.
///
/// On success the pipeline is published through `handle`; on failure the
/// error is logged and the handle stays in Building — queries keep getting
/// `503` until an operator restarts the process.
pub fn spawn_pipeline_build(config: ServerConfig, handle: PipelineHandle) {
    tokio::spawn(async move {
        match build_pipeline(&config).await {
            Ok(pipeline) => {
                let entry_count = pipeline.entry_count();
                handle.publish(Arc::new(pipeline));
                info!(entry_count, "retrieval pipeline is ready");
            }
            Err(e) => {
                error!(error = %e, "pipeline build failed; queries will stay unavailable");
            }
        }
    });
}
