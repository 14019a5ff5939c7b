//! Server configuration from environment variables.

use askdoc_rag::RagConfig;

/// Configuration for the askdoc server process.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Directory holding the corpus files.
    pub corpus_dir: String,
    /// Chunking and retrieval parameters.
    pub rag: RagConfig,
    /// Chat model name for answer synthesis.
    pub chat_model: String,
    /// Embedding model name.
    pub embedding_model: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            corpus_dir: "./data".to_string(),
            rag: RagConfig::default(),
            chat_model: "gpt-4".to_string(),
            embedding_model: "text-embedding-3-small".to_string(),
        }
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name).ok().and_then(|value| value.parse().ok()).unwrap_or(default)
}

impl ServerConfig {
    /// Build a configuration from the environment, falling back to
    /// defaults for anything unset or unparsable.
    ///
    /// Recognized variables: `ASKDOC_HOST`, `PORT`, `ASKDOC_CORPUS_DIR`,
    /// `ASKDOC_CHUNK_SIZE`, `ASKDOC_CHUNK_OVERLAP`, `ASKDOC_TOP_K`,
    /// `ASKDOC_CHAT_MODEL`, `ASKDOC_EMBEDDING_MODEL`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env_or("ASKDOC_HOST", defaults.host),
            port: env_or("PORT", defaults.port),
            corpus_dir: env_or("ASKDOC_CORPUS_DIR", defaults.corpus_dir),
            rag: RagConfig {
                chunk_size: env_or("ASKDOC_CHUNK_SIZE", defaults.rag.chunk_size),
                chunk_overlap: env_or("ASKDOC_CHUNK_OVERLAP", defaults.rag.chunk_overlap),
                top_k: env_or("ASKDOC_TOP_K", defaults.rag.top_k),
            },
            chat_model: env_or("ASKDOC_CHAT_MODEL", defaults.chat_model),
            embedding_model: env_or("ASKDOC_EMBEDDING_MODEL", defaults.embedding_model),
        }
    }
}
