use askdoc_server::{AppState, ServerConfig, run_server, spawn_pipeline_build};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env();
    let state = AppState::default();

    // The build races incoming requests; handlers reject with 503 until
    // the pipeline is published.
    spawn_pipeline_build(config.clone(), state.pipeline.clone());

    run_server(config, state).await
}
