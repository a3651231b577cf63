//! Claims Intake Domain
//!
//! This crate takes an uploaded CSV batch of medical claims through intake
//! and AI enrichment.
//!
//! # Batch Lifecycle
//!
//! ```text
//! CSV text -> parse_claims_csv -> Vec<EnrichedClaim> (Pending)
//!          -> ClaimsPipeline::process (one claim at a time)
//!          -> Vec<EnrichedClaim> (Done | Error)
//! ```

pub mod claim;
pub mod analysis;
pub mod processing;
pub mod intake;
pub mod enrichment;
pub mod pipeline;
pub mod error;

pub use claim::{ClaimRecord, ClaimStatus};
pub use analysis::{AnalysisResult, RiskLevel};
pub use processing::{EnrichedClaim, ProcessingState};
pub use intake::{parse_claims_csv, EXPECTED_HEADER};
pub use enrichment::{AnalysisPort, ClaimEnricher, EnrichmentClient};
pub use pipeline::{BatchSnapshot, ChannelObserver, ClaimsPipeline, NoopObserver, ProgressObserver};
pub use error::{ClaimError, EnrichmentError};
