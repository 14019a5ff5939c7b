//! # askdoc-server
//!
//! The HTTP boundary of askdoc: an axum server exposing `POST /query`
//! plus the static web client, and the one-shot background task that
//! builds the retrieval pipeline at startup.
//!
//! Queries arriving before the build completes are rejected with `503`;
//! once the pipeline is published the server answers until the process
//! exits. A failed build leaves the process permanently not-ready — the
//! recovery path is an operator restart.

pub mod build;
pub mod config;
pub mod routes;
pub mod state;

pub use build::spawn_pipeline_build;
pub use config::ServerConfig;
pub use routes::{app_router, run_server};
pub use state::{AppState, PipelineHandle};
