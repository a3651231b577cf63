//! Ports and Adapters Infrastructure
//!
//! Domain crates declare the outside systems they depend on as port traits
//! and adapters implement them. The AI provider used for claim enrichment is
//! the main example.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Sequential Processing Pipeline               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Port Traits                             │
//! │          (AnalysisPort, defined in domain_claims)            │
//! └─────────────────────────────────────────────────────────────┘
//!                    ▲                         ▲
//!                    │                         │
//!         ┌─────────┴─────────┐     ┌────────┴────────┐
//!         │  Gemini Adapter   │     │   Mock Adapter   │
//!         │   (infra_llm)     │     │  (tests/mock)    │
//!         └───────────────────┘     └──────────────────┘
//! ```

use thiserror::Error;

/// Failure of one call through a port
///
/// Adapters translate their transport and status errors into these variants
/// so the enrichment client can log and classify a failed provider call
/// without knowing which provider sits behind the port.
#[derive(Debug, Error)]
pub enum PortError {
    /// The provider could not be reached
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// No answer within the configured timeout
    #[error("Timeout after {duration_ms}ms: {operation}")]
    Timeout {
        operation: String,
        duration_ms: u64,
    },

    /// The provider refused the credential
    #[error("Unauthorized: {message}")]
    Unauthorized {
        message: String,
    },

    /// The provider asked us to slow down
    #[error("Rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        retry_after_secs: u64,
    },

    /// The provider answered with a server error
    #[error("Service unavailable: {service}")]
    ServiceUnavailable {
        service: String,
    },

    /// The answer arrived but could not be read
    #[error("Transformation error: {message}")]
    Transformation {
        message: String,
    },

    /// Anything else, including unexpected client errors
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a Transformation error
    pub fn transformation(message: impl Into<String>) -> Self {
        PortError::Transformation {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Whether the same call might succeed later
    ///
    /// Calls are not retried; the flag is logged so operators can tell
    /// provider outages from configuration mistakes.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PortError::Connection { .. }
                | PortError::Timeout { .. }
                | PortError::RateLimited { .. }
                | PortError::ServiceUnavailable { .. }
        )
    }
}

/// Supertrait of every port trait
///
/// Ports are shared behind `Arc` across request handlers.
pub trait DomainPort: Send + Sync + 'static {}
