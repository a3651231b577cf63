//! Claims domain errors

use thiserror::Error;

use core_kernel::PortError;

/// Errors that reject a whole batch operation
///
/// Ingest failures and pipeline precondition failures land here. Per-claim
/// enrichment problems never do; they are recorded on the claim itself.
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("CSV file is empty or contains only a header")]
    EmptyInput,

    #[error("CSV header does not match expected format. Expected: {}", expected.join(", "))]
    SchemaMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("No claims to process")]
    NothingToProcess,

    #[error("Claim enrichment is unavailable: no provider credential configured")]
    ClientUnavailable,

    #[error("Invalid processing transition for claim {id} from {from} to {to}")]
    InvalidStateTransition { id: usize, from: String, to: String },
}

/// Why one enrichment attempt did not produce an analysis
#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("Enrichment client is unavailable")]
    Unavailable,

    #[error("Malformed analysis response: {0}")]
    MalformedResponse(String),

    #[error("Analysis provider failed: {0}")]
    Provider(#[from] PortError),
}
