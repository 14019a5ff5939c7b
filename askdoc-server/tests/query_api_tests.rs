//! In-process HTTP tests for the query endpoint and readiness gate.

use std::collections::HashMap;
use std::sync::Arc;

use askdoc_model::MockLlm;
use askdoc_rag::{
    Document, EmbeddingProvider, FixedSizeChunker, PipelineBuilder, QueryPipeline, RagConfig,
    StaticCorpus,
};
use askdoc_server::{AppState, app_router};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Deterministic embedder: one axis per vocabulary word, component = how
/// often that word occurs in the text.
struct VocabEmbedder;

const VOCAB: [&str; 5] = ["sky", "blue", "grass", "green", "color"];

#[async_trait::async_trait]
impl EmbeddingProvider for VocabEmbedder {
    async fn embed(&self, text: &str) -> askdoc_rag::Result<Vec<f32>> {
        let lowered = text.to_lowercase();
        let words: Vec<&str> =
            lowered.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()).collect();
        Ok(VOCAB
            .iter()
            .map(|term| words.iter().filter(|w| *w == term).count() as f32)
            .collect())
    }

    fn dimensions(&self) -> usize {
        VOCAB.len()
    }
}

fn sky_corpus() -> StaticCorpus {
    StaticCorpus::new(vec![Document {
        id: "facts".to_string(),
        text: "The sky is blue. Grass is green.".to_string(),
        metadata: HashMap::new(),
        source_uri: None,
    }])
}

async fn build_pipeline(corpus: StaticCorpus, llm: MockLlm) -> QueryPipeline {
    PipelineBuilder::new()
        .config(RagConfig::builder().chunk_size(20).chunk_overlap(5).top_k(2).build().unwrap())
        .embedding_provider(Arc::new(VocabEmbedder))
        .llm(Arc::new(llm))
        .chunker(Arc::new(FixedSizeChunker::new(20, 5)))
        .corpus(Arc::new(corpus))
        .build()
        .await
        .unwrap()
}

async fn ready_router(corpus: StaticCorpus, llm: MockLlm) -> Router {
    let state = AppState::default();
    state.pipeline.publish(Arc::new(build_pipeline(corpus, llm).await));
    app_router(state)
}

fn query_request(input: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/query")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::json!({ "input": input }).to_string()))
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn query_before_ready_returns_503() {
    let app = app_router(AppState::default());
    let response = app.oneshot(query_request("What color is the sky?")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_text(response).await;
    assert!(body.contains("not ready"));
}

#[tokio::test]
async fn readiness_gate_is_one_way() {
    let state = AppState::default();
    let app = app_router(state.clone());

    let response = app.clone().oneshot(query_request("What color is the sky?")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let pipeline = build_pipeline(sky_corpus(), MockLlm::replying("The sky is blue.")).await;
    state.pipeline.publish(Arc::new(pipeline));

    // Once published, the same query never sees 503 again.
    for _ in 0..3 {
        let response =
            app.clone().oneshot(query_request("What color is the sky?")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn answers_with_expected_shape() {
    let app = ready_router(sky_corpus(), MockLlm::replying("The sky is blue.")).await;
    let response = app.oneshot(query_request("What color is the sky?")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    let answer = body["response"]["answer"].as_str().unwrap();
    assert!(answer.contains("blue"));
}

#[tokio::test]
async fn short_input_is_rejected_without_reaching_the_pipeline() {
    // A failing model would turn any pipeline call into a 500, so a 400
    // proves the request never got that far.
    let app = ready_router(sky_corpus(), MockLlm::failing("must not be called")).await;
    let response = app.oneshot(query_request("ab")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_text(response).await;
    assert_eq!(body, "Query must be at least 3 characters long");
}

#[tokio::test]
async fn whitespace_padding_does_not_satisfy_minimum_length() {
    let app = ready_router(sky_corpus(), MockLlm::failing("must not be called")).await;
    let response = app.oneshot(query_request("  a  ")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn model_failure_maps_to_500_with_generic_body() {
    let app = ready_router(sky_corpus(), MockLlm::failing("connection refused")).await;
    let response = app.oneshot(query_request("What color is the sky?")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_text(response).await;
    assert_eq!(body, "An error occurred while processing your request.");
    assert!(!body.contains("connection refused"));
}

#[tokio::test]
async fn silent_model_is_a_failure_not_an_empty_answer() {
    let app = ready_router(sky_corpus(), MockLlm::silent()).await;
    let response = app.oneshot(query_request("What color is the sky?")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn empty_answer_from_successful_call_is_a_200() {
    let app = ready_router(sky_corpus(), MockLlm::replying("")).await;
    let response = app.oneshot(query_request("What color is the sky?")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["response"]["answer"], "");
}

#[tokio::test]
async fn empty_corpus_still_answers() {
    let app =
        ready_router(StaticCorpus::default(), MockLlm::replying("Nothing to go on.")).await;
    let response = app.oneshot(query_request("any question at all?")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["response"]["answer"], "Nothing to go on.");
}

#[tokio::test]
async fn malformed_body_is_a_client_error() {
    let app = ready_router(sky_corpus(), MockLlm::replying("unused")).await;
    let request = Request::builder()
        .method("POST")
        .uri("/query")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"not_input\": 1}"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn health_reports_readiness() {
    let state = AppState::default();
    let app = app_router(state.clone());

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["ready"], false);

    let pipeline = build_pipeline(sky_corpus(), MockLlm::replying("ok")).await;
    state.pipeline.publish(Arc::new(pipeline));

    let response =
        app.oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap()).await.unwrap();
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["ready"], true);
}

#[tokio::test]
async fn serves_the_web_client() {
    let app = app_router(AppState::default());
    let response =
        app.oneshot(Request::builder().uri("/").body(Body::empty()).unwrap()).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("query-form"));
}
