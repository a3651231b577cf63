//! Property-Based Test Generators
//!
//! Proptest strategies for CSV rows and enriched batches.

use proptest::prelude::*;

use domain_claims::{AnalysisResult, ClaimRecord, ClaimStatus, EnrichedClaim, RiskLevel};

use crate::builders::EnrichedClaimBuilder;

/// Strategy for a CSV status cell, including unknown values
pub fn status_strategy() -> impl Strategy<Value = ClaimStatus> {
    prop_oneof![
        Just(ClaimStatus::Submitted),
        Just(ClaimStatus::UnderReview),
        Just(ClaimStatus::Approved),
        Just(ClaimStatus::Rejected),
        Just(ClaimStatus::Other("Pended".to_string())),
        Just(ClaimStatus::Other("Appealed".to_string())),
    ]
}

/// Strategy for provider names drawn from a small pool so counts collide
pub fn provider_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Acme Clinic".to_string()),
        Just("Beta Health".to_string()),
        Just("Gamma Surgical".to_string()),
        Just("Delta Labs".to_string()),
        Just("Epsilon Care".to_string()),
        Just("Zeta Imaging".to_string()),
        Just("Eta Pharmacy".to_string()),
    ]
}

/// Strategy for approval dates: valid ISO days in early 2024, blanks, and junk
pub fn approval_date_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        6 => (1u32..=3, 1u32..=28).prop_map(|(m, d)| format!("2024-{:02}-{:02}", m, d)),
        2 => Just(String::new()),
        1 => Just("pending".to_string()),
    ]
}

/// Strategy for a claim record with comma-free cells
pub fn claim_record_strategy() -> impl Strategy<Value = ClaimRecord> {
    (
        "[A-Z]{1,3}[0-9]{1,5}",
        provider_strategy(),
        status_strategy(),
        approval_date_strategy(),
        0u32..100_000,
    )
        .prop_map(|(claim_id, provider_name, status, approval_date, amount)| ClaimRecord {
            claim_id,
            patient_id: "P1".to_string(),
            provider_name,
            date_of_service: "2024-01-01".to_string(),
            diagnosis_code: "D1".to_string(),
            procedure_code: "99213".to_string(),
            claim_amount: amount.to_string(),
            insurance_policy_number: "POL1".to_string(),
            status,
            submitted_date: "2024-01-01".to_string(),
            approval_date,
        })
}

/// Strategy for an analysis result
pub fn analysis_strategy() -> impl Strategy<Value = AnalysisResult> {
    (
        prop_oneof![Just(RiskLevel::Low), Just(RiskLevel::Medium), Just(RiskLevel::High)],
        prop::collection::vec("[a-z ]{3,12}", 0..3),
    )
        .prop_map(|(risk, errors)| AnalysisResult::new(errors, risk, "Standard Review"))
}

/// Strategy for a terminal batch with ids `0..len`
pub fn enriched_batch_strategy(max_len: usize) -> impl Strategy<Value = Vec<EnrichedClaim>> {
    prop::collection::vec(
        (claim_record_strategy(), prop::option::weighted(0.8, analysis_strategy())),
        0..max_len,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(id, (record, analysis))| {
                let builder = EnrichedClaimBuilder::new(id).record(record);
                match analysis {
                    Some(analysis) => builder.done(analysis).build(),
                    None => builder.failed().build(),
                }
            })
            .collect()
    })
}

/// Renders a record as one CSV data line
pub fn to_csv_line(record: &ClaimRecord) -> String {
    [
        record.claim_id.as_str(),
        record.patient_id.as_str(),
        record.provider_name.as_str(),
        record.date_of_service.as_str(),
        record.diagnosis_code.as_str(),
        record.procedure_code.as_str(),
        record.claim_amount.as_str(),
        record.insurance_policy_number.as_str(),
        record.status.as_str(),
        record.submitted_date.as_str(),
        record.approval_date.as_str(),
    ]
    .join(",")
}
