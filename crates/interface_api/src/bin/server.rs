//! Claims RPA - API Server Binary
//!
//! This binary starts the HTTP API server for claims intake, AI enrichment,
//! and dashboard statistics.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin claims-rpa-api
//!
//! # Run with environment variables
//! API_PORT=8080 LLM_API_KEY=... cargo run --bin claims-rpa-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_MAX_BODY_BYTES` - Largest accepted upload (default: 10 MiB)
//! * `LLM_API_KEY` - Gemini API key; `API_KEY` is read when unset
//! * `LLM_MODEL` - Gemini model (default: gemini-2.5-flash)
//! * `LLM_BASE_URL` - Gemini REST root
//! * `LLM_TEMPERATURE` - Sampling temperature (default: 0.2)
//! * `LLM_TIMEOUT_SECS` - Per-request timeout (default: 60)

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_claims::{ClaimEnricher, EnrichmentClient};
use infra_llm::{GeminiAdapter, LlmConfig};
use interface_api::{config::ApiConfig, create_router};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, builds the enrichment client,
/// and starts the HTTP server.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded from environment
/// - Server fails to bind to the configured address
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("loading API_* configuration")?;

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "Starting Claims RPA API Server"
    );

    let llm_config = LlmConfig::from_env().context("loading LLM_* configuration")?;
    let model = llm_config.model.clone();
    let adapter = GeminiAdapter::new(llm_config).context("building Gemini adapter")?;
    let enricher: Arc<dyn ClaimEnricher> = Arc::new(EnrichmentClient::new(Arc::new(adapter)));

    if enricher.is_available() {
        tracing::info!(model = %model, "Claim enrichment enabled");
    } else {
        tracing::warn!("No API key configured (LLM_API_KEY or API_KEY); claim processing is disabled");
    }

    let app = create_router(enricher, config.clone());

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid server address {}", config.server_addr()))?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// `RUST_LOG` wins over the configured level when set.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// In-flight requests, including a running batch, are allowed to finish.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
