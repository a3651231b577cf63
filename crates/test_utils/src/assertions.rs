//! Custom Test Assertions
//!
//! Assertion helpers for batch invariants that give more meaningful failure
//! messages than a bare `assert!`.

use domain_claims::{AnalysisResult, EnrichedClaim, ProcessingState};

/// Asserts that no claim is left Pending or Processing
///
/// # Panics
///
/// Panics naming the first claim that is not terminal
pub fn assert_batch_terminal(claims: &[EnrichedClaim]) {
    for claim in claims {
        assert!(
            claim.state().is_terminal(),
            "Claim {} ({}) left in state {}",
            claim.id(),
            claim.record().claim_id,
            claim.state()
        );
    }
}

/// Asserts that ids run `0..len` in order
pub fn assert_row_order(claims: &[EnrichedClaim]) {
    for (index, claim) in claims.iter().enumerate() {
        assert_eq!(
            claim.id(),
            index,
            "Claim at position {} has id {}",
            index,
            claim.id()
        );
    }
}

/// Asserts that analysis is present exactly for terminal claims
pub fn assert_analysis_matches_state(claims: &[EnrichedClaim]) {
    for claim in claims {
        assert_eq!(
            claim.analysis().is_some(),
            claim.state().is_terminal(),
            "Claim {} in state {} has analysis {:?}",
            claim.id(),
            claim.state(),
            claim.analysis()
        );
    }
}

/// Asserts that a claim failed and carries the processing fallback
pub fn assert_processing_fallback(claim: &EnrichedClaim) {
    assert_eq!(
        claim.state(),
        ProcessingState::Error,
        "Claim {} expected Error, got {}",
        claim.id(),
        claim.state()
    );
    assert_eq!(
        claim.analysis(),
        Some(&AnalysisResult::processing_failed()),
        "Claim {} does not carry the processing fallback",
        claim.id()
    );
}
