//! Claims DTOs

use serde::{Deserialize, Serialize};

use domain_analytics::DashboardStats;
use domain_claims::{AnalysisResult, ClaimError, ClaimRecord, EnrichedClaim, ProcessingState};

/// Parsed upload, every claim Pending
#[derive(Debug, Serialize)]
pub struct IntakeResponse {
    pub total: usize,
    pub claims: Vec<EnrichedClaim>,
}

/// Final batch of a processing run with its dashboard
#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub total: usize,
    pub done: usize,
    pub errors: usize,
    pub claims: Vec<EnrichedClaim>,
    pub dashboard: DashboardStats,
}

impl ProcessResponse {
    pub fn new(claims: Vec<EnrichedClaim>) -> Self {
        let errors = claims
            .iter()
            .filter(|c| c.state() == ProcessingState::Error)
            .count();
        let done = claims
            .iter()
            .filter(|c| c.state() == ProcessingState::Done)
            .count();
        let dashboard = DashboardStats::compute(&claims);
        Self {
            total: claims.len(),
            done,
            errors,
            claims,
            dashboard,
        }
    }
}

/// One claim as a client sends it back, in the shape the API returns
#[derive(Debug, Deserialize)]
pub struct ClaimPayload {
    pub id: usize,
    #[serde(flatten)]
    pub record: ClaimRecord,
    #[serde(rename = "processingState")]
    pub state: ProcessingState,
    #[serde(rename = "aiAnalysis", default)]
    pub analysis: Option<AnalysisResult>,
}

impl TryFrom<ClaimPayload> for EnrichedClaim {
    type Error = ClaimError;

    fn try_from(payload: ClaimPayload) -> Result<Self, Self::Error> {
        EnrichedClaim::from_parts(payload.id, payload.record, payload.state, payload.analysis)
    }
}

#[derive(Debug, Deserialize)]
pub struct DashboardRequest {
    pub claims: Vec<ClaimPayload>,
}
