//! Gemini adapter tests against a local fake server

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use core_kernel::PortError;
use domain_claims::{
    parse_claims_csv, AnalysisPort, AnalysisResult, ClaimEnricher, ClaimRecord, EnrichmentClient,
};
use infra_llm::{GeminiAdapter, LlmConfig};
use test_utils::{AnalysisFixtures, CsvFixtures};

#[derive(Clone)]
struct FakeGemini {
    status: StatusCode,
    body: Value,
    delay: Duration,
    seen: Arc<Mutex<Vec<(String, Option<String>, Value)>>>,
}

impl FakeGemini {
    fn answering(text: &str) -> Self {
        Self::with_status(
            StatusCode::OK,
            json!({ "candidates": [{ "content": { "parts": [{ "text": text }] } }] }),
        )
    }

    fn with_status(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            body,
            delay: Duration::ZERO,
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

async fn generate(
    State(fake): State<FakeGemini>,
    Path(action): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let key = headers
        .get("x-goog-api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    fake.seen.lock().unwrap().push((action, key, body));
    if !fake.delay.is_zero() {
        tokio::time::sleep(fake.delay).await;
    }
    let mut response = (fake.status, Json(fake.body.clone())).into_response();
    if fake.status == StatusCode::TOO_MANY_REQUESTS {
        response
            .headers_mut()
            .insert("retry-after", "12".parse().unwrap());
    }
    response
}

async fn serve(fake: FakeGemini) -> SocketAddr {
    let app = Router::new()
        .route("/v1beta/models/:action", post(generate))
        .with_state(fake);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn adapter_for(addr: SocketAddr) -> GeminiAdapter {
    let mut config = LlmConfig::default().with_api_key("secret-key");
    config.base_url = format!("http://{}/v1beta", addr);
    config.timeout_secs = 1;
    GeminiAdapter::new(config).unwrap()
}

fn claim() -> ClaimRecord {
    ClaimRecord {
        claim_id: "C1".to_string(),
        provider_name: "Acme Clinic".to_string(),
        procedure_code: "27447".to_string(),
        claim_amount: "50000".to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_generate_returns_candidate_text() {
    let fake = FakeGemini::answering("{\"ok\":true}");
    let seen = fake.seen.clone();
    let adapter = adapter_for(serve(fake).await);

    let text = adapter.generate("analyse this").await.unwrap();

    assert_eq!(text, "{\"ok\":true}");
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let (action, key, body) = &seen[0];
    assert_eq!(action, "gemini-2.5-flash:generateContent");
    assert_eq!(key.as_deref(), Some("secret-key"));
    assert_eq!(body["contents"][0]["parts"][0]["text"], "analyse this");
    assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
}

#[tokio::test]
async fn test_unauthorized_maps_to_port_error() {
    let adapter = adapter_for(
        serve(FakeGemini::with_status(
            StatusCode::FORBIDDEN,
            json!({ "error": { "message": "API key not valid" } }),
        ))
        .await,
    );

    let err = adapter.generate("x").await.unwrap_err();

    assert!(matches!(err, PortError::Unauthorized { .. }));
    assert!(!err.is_transient());
}

#[tokio::test]
async fn test_rate_limit_reads_retry_after() {
    let adapter = adapter_for(
        serve(FakeGemini::with_status(StatusCode::TOO_MANY_REQUESTS, json!({}))).await,
    );

    let err = adapter.generate("x").await.unwrap_err();

    assert!(matches!(err, PortError::RateLimited { retry_after_secs: 12 }));
}

#[tokio::test]
async fn test_server_error_is_unavailable() {
    let adapter = adapter_for(
        serve(FakeGemini::with_status(StatusCode::SERVICE_UNAVAILABLE, json!({}))).await,
    );

    let err = adapter.generate("x").await.unwrap_err();

    assert!(matches!(err, PortError::ServiceUnavailable { .. }));
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_empty_candidates_is_transformation_error() {
    let adapter =
        adapter_for(serve(FakeGemini::with_status(StatusCode::OK, json!({ "candidates": [] }))).await);

    let err = adapter.generate("x").await.unwrap_err();

    assert!(matches!(err, PortError::Transformation { .. }));
}

#[tokio::test]
async fn test_slow_provider_times_out() {
    let mut fake = FakeGemini::answering("{}");
    fake.delay = Duration::from_secs(3);
    let adapter = adapter_for(serve(fake).await);

    let err = adapter.generate("x").await.unwrap_err();

    assert!(matches!(err, PortError::Timeout { .. }));
}

#[tokio::test]
async fn test_unreachable_provider_is_connection_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = adapter_for(addr).generate("x").await.unwrap_err();

    assert!(matches!(err, PortError::Connection { .. }));
}

#[tokio::test]
async fn test_enrichment_client_end_to_end() {
    let fake = FakeGemini::answering(&AnalysisFixtures::high_surgical_fenced());
    let seen = fake.seen.clone();
    let client = EnrichmentClient::new(Arc::new(adapter_for(serve(fake).await)));
    let batch = parse_claims_csv(&CsvFixtures::single_high_value()).unwrap();

    let analysis = client.enrich(batch[0].record()).await.unwrap();

    assert_eq!(analysis, AnalysisFixtures::high_surgical());
    let prompt = seen.lock().unwrap()[0].2["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(prompt.contains("\"C9\""));
}

#[tokio::test]
async fn test_enrichment_client_degrades_on_provider_failure() {
    let client = EnrichmentClient::new(Arc::new(adapter_for(
        serve(FakeGemini::with_status(StatusCode::INTERNAL_SERVER_ERROR, json!({}))).await,
    )));

    let analysis = client.enrich(&claim()).await.unwrap();

    assert_eq!(analysis, AnalysisResult::analysis_failed());
}

#[tokio::test]
async fn test_unconfigured_adapter_makes_client_unavailable() {
    let client = EnrichmentClient::new(Arc::new(GeminiAdapter::new(LlmConfig::default()).unwrap()));

    assert!(!client.is_available());
    assert!(client.enrich(&claim()).await.is_err());
}
