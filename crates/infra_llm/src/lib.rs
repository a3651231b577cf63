//! Language Model Infrastructure
//!
//! Adapters that implement [`AnalysisPort`](domain_claims::AnalysisPort) on
//! top of a hosted model. Only Google Gemini is wired up today.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use domain_claims::EnrichmentClient;
//! use infra_llm::{GeminiAdapter, LlmConfig};
//!
//! let adapter = GeminiAdapter::new(LlmConfig::from_env()?)?;
//! let client = EnrichmentClient::new(Arc::new(adapter));
//! ```

pub mod config;
pub mod error;
pub mod gemini;

pub use config::LlmConfig;
pub use error::LlmError;
pub use gemini::GeminiAdapter;
