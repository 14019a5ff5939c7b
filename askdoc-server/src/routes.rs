//! HTTP routes and handlers.

use std::net::SocketAddr;

use anyhow::Context;
use askdoc_rag::RagError;
use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use crate::config::ServerConfig;
use crate::state::AppState;

/// Build the application router.
pub fn app_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/app.js", get(app_js))
        .route("/styles.css", get(styles))
        .route("/health", get(health))
        .route("/query", post(query))
        .with_state(state)
        .layer(cors)
}

/// Bind and serve until the process exits.
pub async fn run_server(config: ServerConfig, state: AppState) -> anyhow::Result<()> {
    let app = app_router(state);
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| "invalid host/port for askdoc server")?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("askdoc listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn index() -> impl IntoResponse {
    Html(include_str!("../ui/index.html"))
}

async fn app_js() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/javascript")], include_str!("../ui/app.js"))
}

async fn styles() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css")], include_str!("../ui/styles.css"))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({"status": "ok", "ready": state.pipeline.is_ready()}))
}

/// Request body for `POST /query`.
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    /// The user's question.
    pub input: String,
}

#[derive(Debug, Serialize)]
struct AnswerBody {
    answer: String,
}

#[derive(Debug, Serialize)]
struct QueryResponse {
    response: AnswerBody,
}

/// `POST /query` — answer a question against the ingested corpus.
///
/// `503` while the pipeline is still building (queries are rejected, not
/// queued), `400` for locally rejected input, `500` for any query-path
/// failure. Failure details are logged, never sent to the client.
async fn query(State(state): State<AppState>, Json(request): Json<QueryRequest>) -> Response {
    let pipeline = match state.pipeline.get() {
        Ok(pipeline) => pipeline,
        Err(_) => {
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                "Retrieval pipeline is not ready yet. Please try again later.",
            )
                .into_response();
        }
    };

    let input = request.input.trim();
    if input.chars().count() < 3 {
        return (StatusCode::BAD_REQUEST, "Query must be at least 3 characters long")
            .into_response();
    }

    match pipeline.answer(input).await {
        Ok(answer) => {
            (StatusCode::OK, Json(QueryResponse { response: AnswerBody { answer } }))
                .into_response()
        }
        Err(RagError::InvalidQuery(message)) => {
            (StatusCode::BAD_REQUEST, message).into_response()
        }
        Err(e) => {
            error!(error = %e, "error processing query");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An error occurred while processing your request.",
            )
                .into_response()
        }
    }
}
