//! Process-wide pipeline lifecycle state.

use std::sync::{Arc, OnceLock};

use askdoc_rag::{QueryPipeline, RagError};

/// The Building → Ready lifecycle as an explicit handle.
///
/// Starts empty (Building). The build task publishes the finished pipeline
/// exactly once; the transition is one-way and is the sole synchronization
/// point between the build and query paths. Reads after publish are
/// lock-free, so concurrent queries share the pipeline without contention.
#[derive(Clone, Default)]
pub struct PipelineHandle {
    cell: Arc<OnceLock<Arc<QueryPipeline>>>,
}

impl PipelineHandle {
    /// Create a handle in the Building state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish the built pipeline, transitioning to Ready.
    ///
    /// Returns `false` if a pipeline was already published; the first
    /// publish wins and later ones are ignored.
    pub fn publish(&self, pipeline: Arc<QueryPipeline>) -> bool {
        self.cell.set(pipeline).is_ok()
    }

    /// Get the pipeline, or [`RagError::NotReady`] while still Building.
    pub fn get(&self) -> Result<Arc<QueryPipeline>, RagError> {
        self.cell.get().cloned().ok_or(RagError::NotReady)
    }

    /// Whether the pipeline has been published.
    pub fn is_ready(&self) -> bool {
        self.cell.get().is_some()
    }
}

/// Shared state handed to request handlers.
#[derive(Clone, Default)]
pub struct AppState {
    /// The pipeline lifecycle handle.
    pub pipeline: PipelineHandle,
}
