//! Claims handlers
//!
//! Each request owns its batch. Nothing is kept between requests.

use axum::{
    extract::State,
    http::{header, HeaderMap},
    Json,
};
use tracing::{debug, info};

use domain_analytics::DashboardStats;
use domain_claims::{parse_claims_csv, BatchSnapshot, ClaimsPipeline, EnrichedClaim};

use crate::dto::claims::*;
use crate::{error::ApiError, AppState};

const CSV_MEDIA_TYPE: &str = "text/csv";

/// Rejects uploads not declared as `text/csv`; media type parameters are ignored
fn require_csv(headers: &HeaderMap) -> Result<(), ApiError> {
    let is_csv = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case(CSV_MEDIA_TYPE));

    if is_csv {
        Ok(())
    } else {
        Err(ApiError::UnsupportedMediaType(
            "Invalid file type. Please upload a CSV file.".to_string(),
        ))
    }
}

/// Parses an uploaded CSV batch
pub async fn intake(headers: HeaderMap, body: String) -> Result<Json<IntakeResponse>, ApiError> {
    require_csv(&headers)?;
    let claims = parse_claims_csv(&body)?;
    info!(total = claims.len(), "Claims batch ingested");

    Ok(Json(IntakeResponse {
        total: claims.len(),
        claims,
    }))
}

/// Parses an uploaded CSV batch and enriches every claim in it
pub async fn process(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<ProcessResponse>, ApiError> {
    require_csv(&headers)?;
    let claims = parse_claims_csv(&body)?;
    let pipeline = ClaimsPipeline::new(state.enricher.clone());

    let mut log_progress = |snapshot: BatchSnapshot| {
        debug!(
            batch_id = %snapshot.batch_id,
            current = snapshot.current,
            completed = snapshot.completed,
            total = snapshot.total,
            "Batch progress"
        );
    };
    let claims = pipeline.process(claims, &mut log_progress).await?;

    Ok(Json(ProcessResponse::new(claims)))
}

/// Computes dashboard statistics over a batch the client already holds
pub async fn dashboard(
    Json(request): Json<DashboardRequest>,
) -> Result<Json<DashboardStats>, ApiError> {
    let claims = request
        .claims
        .into_iter()
        .map(EnrichedClaim::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(DashboardStats::compute(&claims)))
}
