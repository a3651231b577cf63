//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! claims RPA test suite.
//!
//! # Modules
//!
//! - `fixtures`: Ready-made CSV uploads and analysis results
//! - `builders`: Builder patterns for claim records and enriched claims
//! - `stubs`: Scripted `ClaimEnricher` implementations
//! - `assertions`: Custom assertion helpers for batch invariants
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod stubs;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use stubs::*;
pub use assertions::*;
pub use generators::*;

pub use domain_claims::enrichment::mock::{MockAnalysisPort, MockEnricher};
