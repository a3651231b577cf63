//! Adapter setup errors
//!
//! Call-time failures are reported as [`PortError`](core_kernel::PortError);
//! these cover building the adapter.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Invalid language model configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Invalid base URL '{0}'")]
    InvalidBaseUrl(String),
}
