//! Claim record as read from an uploaded CSV batch

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Business adjudication status carried in the CSV `status` column
///
/// This is the payer's view of the claim and is unrelated to
/// [`ProcessingState`](crate::processing::ProcessingState), which tracks
/// enrichment progress inside one batch run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ClaimStatus {
    Submitted,
    UnderReview,
    Approved,
    Rejected,
    /// Any status text outside the known set, kept verbatim
    Other(String),
}

impl ClaimStatus {
    /// Parses the CSV text form; unknown values pass through untouched
    pub fn parse(value: &str) -> Self {
        match value {
            "Submitted" => ClaimStatus::Submitted,
            "Under Review" => ClaimStatus::UnderReview,
            "Approved" => ClaimStatus::Approved,
            "Rejected" => ClaimStatus::Rejected,
            other => ClaimStatus::Other(other.to_string()),
        }
    }

    /// Text form as it appears in the CSV
    pub fn as_str(&self) -> &str {
        match self {
            ClaimStatus::Submitted => "Submitted",
            ClaimStatus::UnderReview => "Under Review",
            ClaimStatus::Approved => "Approved",
            ClaimStatus::Rejected => "Rejected",
            ClaimStatus::Other(value) => value,
        }
    }

    /// True for statuses where the payer has not decided yet
    pub fn is_awaiting_decision(&self) -> bool {
        matches!(self, ClaimStatus::Submitted | ClaimStatus::UnderReview)
    }
}

impl Default for ClaimStatus {
    fn default() -> Self {
        ClaimStatus::Submitted
    }
}

impl From<String> for ClaimStatus {
    fn from(value: String) -> Self {
        ClaimStatus::parse(&value)
    }
}

impl From<ClaimStatus> for String {
    fn from(status: ClaimStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One medical claim row
///
/// Every field is kept as the text found in the upload. Numeric and date
/// interpretation happens later, in analysis and aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClaimRecord {
    pub claim_id: String,
    pub patient_id: String,
    pub provider_name: String,
    pub date_of_service: String,
    pub diagnosis_code: String,
    pub procedure_code: String,
    /// Decimal amount as text
    pub claim_amount: String,
    pub insurance_policy_number: String,
    pub status: ClaimStatus,
    pub submitted_date: String,
    pub approval_date: String,
}

impl ClaimRecord {
    /// Decimal view of `claim_amount`, if it parses
    ///
    /// Accepts an optional leading `$` and thousands separators.
    pub fn claim_amount_value(&self) -> Option<Decimal> {
        let cleaned: String = self
            .claim_amount
            .trim()
            .trim_start_matches('$')
            .chars()
            .filter(|c| *c != ',')
            .collect();
        if cleaned.is_empty() {
            return None;
        }
        cleaned.parse::<Decimal>().ok()
    }
}
