//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrichment_available: Option<bool>,
}

#[derive(Serialize)]
pub struct CapabilitiesResponse {
    pub enrichment_available: bool,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        enrichment_available: None,
    })
}

/// Readiness check (reports whether enrichment can run)
///
/// The server is ready without a provider key: intake and dashboards still
/// work, only batch processing is refused.
pub async fn readiness_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ready".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        enrichment_available: Some(state.enricher.is_available()),
    })
}

/// What the client may offer the user
pub async fn capabilities(State(state): State<AppState>) -> Json<CapabilitiesResponse> {
    Json(CapabilitiesResponse {
        enrichment_available: state.enricher.is_available(),
    })
}
