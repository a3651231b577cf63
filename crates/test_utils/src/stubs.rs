//! Scripted enrichers
//!
//! `MockEnricher` from `domain_claims` covers call-order scripts. The stubs
//! here cover behavior keyed on the claim itself and concurrency probing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use core_kernel::PortError;
use domain_claims::{AnalysisResult, ClaimEnricher, ClaimRecord, EnrichmentError};

/// Enricher whose outcome depends on the claim id
///
/// Ids mapped to `None` fail; unmapped ids get the default analysis.
pub struct ClaimKeyedEnricher {
    outcomes: HashMap<String, Option<AnalysisResult>>,
    default: AnalysisResult,
}

impl ClaimKeyedEnricher {
    pub fn new(default: AnalysisResult) -> Self {
        Self {
            outcomes: HashMap::new(),
            default,
        }
    }

    pub fn answer(mut self, claim_id: &str, analysis: AnalysisResult) -> Self {
        self.outcomes.insert(claim_id.to_string(), Some(analysis));
        self
    }

    pub fn fail_on(mut self, claim_id: &str) -> Self {
        self.outcomes.insert(claim_id.to_string(), None);
        self
    }
}

#[async_trait]
impl ClaimEnricher for ClaimKeyedEnricher {
    fn is_available(&self) -> bool {
        true
    }

    async fn enrich(&self, claim: &ClaimRecord) -> Result<AnalysisResult, EnrichmentError> {
        match self.outcomes.get(&claim.claim_id) {
            Some(Some(analysis)) => Ok(analysis.clone()),
            Some(None) => Err(EnrichmentError::Provider(PortError::ServiceUnavailable {
                service: "scripted".to_string(),
            })),
            None => Ok(self.default.clone()),
        }
    }
}

/// Enricher that fails every call
#[derive(Debug, Default)]
pub struct FailingEnricher;

#[async_trait]
impl ClaimEnricher for FailingEnricher {
    fn is_available(&self) -> bool {
        true
    }

    async fn enrich(&self, _claim: &ClaimRecord) -> Result<AnalysisResult, EnrichmentError> {
        Err(EnrichmentError::Provider(PortError::internal("provider raised")))
    }
}

/// Enricher that sleeps on each call and records overlap
///
/// After a batch run, `max_in_flight()` must be 1 for a sequential caller.
#[derive(Debug)]
pub struct SlowEnricher {
    delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    order: Mutex<Vec<String>>,
}

impl SlowEnricher {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            order: Mutex::new(Vec::new()),
        }
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Claim ids in the order their calls started
    pub fn order(&self) -> Vec<String> {
        self.order.lock().map(|o| o.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ClaimEnricher for SlowEnricher {
    fn is_available(&self) -> bool {
        true
    }

    async fn enrich(&self, claim: &ClaimRecord) -> Result<AnalysisResult, EnrichmentError> {
        if let Ok(mut order) = self.order.lock() {
            order.push(claim.claim_id.clone());
        }
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(AnalysisResult::new(
            Vec::new(),
            domain_claims::RiskLevel::Low,
            "Auto-Approval",
        ))
    }
}
