//! Test Data Builders
//!
//! Builders for claim records and enriched claims. Tests set only the
//! fields they care about; everything else gets a plausible default.

use domain_claims::{AnalysisResult, ClaimRecord, ClaimStatus, EnrichedClaim};

/// Builder for constructing test claim records
pub struct ClaimRecordBuilder {
    record: ClaimRecord,
}

impl Default for ClaimRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimRecordBuilder {
    /// Creates a new builder for a clean submitted office-visit claim
    pub fn new() -> Self {
        Self {
            record: ClaimRecord {
                claim_id: "CLM-0001".to_string(),
                patient_id: "PAT-0001".to_string(),
                provider_name: "Acme Clinic".to_string(),
                date_of_service: "2024-01-01".to_string(),
                diagnosis_code: "J06.9".to_string(),
                procedure_code: "99213".to_string(),
                claim_amount: "150.00".to_string(),
                insurance_policy_number: "POL-0001".to_string(),
                status: ClaimStatus::Submitted,
                submitted_date: "2024-01-02".to_string(),
                approval_date: String::new(),
            },
        }
    }

    pub fn claim_id(mut self, id: impl Into<String>) -> Self {
        self.record.claim_id = id.into();
        self
    }

    pub fn provider(mut self, name: impl Into<String>) -> Self {
        self.record.provider_name = name.into();
        self
    }

    pub fn procedure_code(mut self, code: impl Into<String>) -> Self {
        self.record.procedure_code = code.into();
        self
    }

    pub fn amount(mut self, amount: impl Into<String>) -> Self {
        self.record.claim_amount = amount.into();
        self
    }

    pub fn status(mut self, status: ClaimStatus) -> Self {
        self.record.status = status;
        self
    }

    /// Marks the claim approved on the given date
    pub fn approved_on(mut self, date: impl Into<String>) -> Self {
        self.record.status = ClaimStatus::Approved;
        self.record.approval_date = date.into();
        self
    }

    pub fn build(self) -> ClaimRecord {
        self.record
    }
}

/// Builder for enriched claims in any processing state
pub struct EnrichedClaimBuilder {
    id: usize,
    record: ClaimRecord,
    outcome: Outcome,
}

enum Outcome {
    Pending,
    Processing,
    Done(AnalysisResult),
    Error,
}

impl EnrichedClaimBuilder {
    pub fn new(id: usize) -> Self {
        Self {
            id,
            record: ClaimRecordBuilder::new()
                .claim_id(format!("CLM-{:04}", id))
                .build(),
            outcome: Outcome::Pending,
        }
    }

    pub fn record(mut self, record: ClaimRecord) -> Self {
        self.record = record;
        self
    }

    /// Leaves the claim mid-flight
    pub fn processing(mut self) -> Self {
        self.outcome = Outcome::Processing;
        self
    }

    /// Completes the claim with the given analysis
    pub fn done(mut self, analysis: AnalysisResult) -> Self {
        self.outcome = Outcome::Done(analysis);
        self
    }

    /// Fails the claim with the processing fallback
    pub fn failed(mut self) -> Self {
        self.outcome = Outcome::Error;
        self
    }

    /// Builds the claim by driving it through the real transitions
    ///
    /// # Panics
    ///
    /// Never in practice: every path here follows a legal transition.
    pub fn build(self) -> EnrichedClaim {
        let mut claim = EnrichedClaim::pending(self.id, self.record);
        match self.outcome {
            Outcome::Pending => {}
            Outcome::Processing => claim.begin_processing().expect("pending -> processing"),
            Outcome::Done(analysis) => {
                claim.begin_processing().expect("pending -> processing");
                claim.complete(analysis).expect("processing -> done");
            }
            Outcome::Error => {
                claim.begin_processing().expect("pending -> processing");
                claim.fail().expect("processing -> error");
            }
        }
        claim
    }
}
