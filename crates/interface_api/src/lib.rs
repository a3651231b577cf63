//! HTTP API Layer
//!
//! This crate provides the REST API for the claims RPA service using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: CSV intake, batch processing, dashboard, health
//! - **Middleware**: Request logging, tracing, body size limit
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(enricher, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
    middleware as axum_middleware,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use domain_claims::ClaimEnricher;

use crate::config::ApiConfig;
use crate::handlers::{claims, health};
use crate::middleware::request_logging;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub enricher: Arc<dyn ClaimEnricher>,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `enricher` - Claim enricher used by batch processing
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(enricher: Arc<dyn ClaimEnricher>, config: ApiConfig) -> Router {
    let body_limit = config.max_body_bytes;
    let state = AppState { enricher, config };

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let claims_routes = Router::new()
        .route("/intake", post(claims::intake))
        .route("/process", post(claims::process))
        .route("/dashboard", post(claims::dashboard));

    let api_routes = Router::new()
        .route("/capabilities", get(health::capabilities))
        .nest("/claims", claims_routes)
        .layer(axum_middleware::from_fn(request_logging));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
