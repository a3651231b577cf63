//! Claim enrichment client
//!
//! Turns one claim into an [`AnalysisResult`] by asking an external language
//! model through the [`AnalysisPort`] seam. The client owns the instruction
//! text and the response decoding; the port only moves text.
//!
//! Outcomes of [`ClaimEnricher::enrich`]:
//! - `Ok(analysis)` for a well-formed answer
//! - `Ok(AnalysisResult::analysis_failed())` when the provider call itself
//!   fails, so transport problems degrade to a safe high-risk result
//! - `Err(EnrichmentError::MalformedResponse)` when the answer cannot be
//!   decoded; the pipeline maps every `Err` to its own fallback

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use core_kernel::{DomainPort, PortError};

use crate::analysis::{decode_analysis, AnalysisResult};
use crate::claim::ClaimRecord;
use crate::error::EnrichmentError;

/// Claim amounts above this are treated as high value
pub const HIGH_VALUE_THRESHOLD: u32 = 10_000;

/// CPT codes in this range denote surgical procedures
pub const SURGICAL_CPT_RANGE: std::ops::RangeInclusive<u32> = 10_000..=69_999;

/// Outbound seam to a text-generation provider
#[async_trait]
pub trait AnalysisPort: DomainPort {
    /// Whether the adapter holds the credential it needs to make calls
    fn is_configured(&self) -> bool;

    /// Sends one prompt and returns the raw text of the answer
    async fn generate(&self, prompt: &str) -> Result<String, PortError>;
}

/// Anything the pipeline can ask to enrich a claim
#[async_trait]
pub trait ClaimEnricher: Send + Sync {
    /// Capability query; callers must not invoke `enrich` when false
    fn is_available(&self) -> bool;

    async fn enrich(&self, claim: &ClaimRecord) -> Result<AnalysisResult, EnrichmentError>;
}

/// Default [`ClaimEnricher`] backed by an [`AnalysisPort`]
pub struct EnrichmentClient {
    port: Arc<dyn AnalysisPort>,
}

impl EnrichmentClient {
    pub fn new(port: Arc<dyn AnalysisPort>) -> Self {
        Self { port }
    }
}

#[async_trait]
impl ClaimEnricher for EnrichmentClient {
    fn is_available(&self) -> bool {
        self.port.is_configured()
    }

    async fn enrich(&self, claim: &ClaimRecord) -> Result<AnalysisResult, EnrichmentError> {
        if !self.is_available() {
            return Err(EnrichmentError::Unavailable);
        }

        let prompt = build_prompt(claim);
        let raw = match self.port.generate(&prompt).await {
            Ok(raw) => raw,
            Err(error) => {
                warn!(
                    claim_id = %claim.claim_id,
                    transient = error.is_transient(),
                    error = %error,
                    "Analysis provider call failed, using fallback analysis"
                );
                return Ok(AnalysisResult::analysis_failed());
            }
        };

        decode_analysis(&raw).map_err(|error| {
            warn!(
                claim_id = %claim.claim_id,
                error = %error,
                response = %raw,
                "Analysis response could not be decoded"
            );
            error
        })
    }
}

/// Builds the instruction text for one claim
///
/// The claim is embedded as pretty-printed JSON with its CSV column names.
pub fn build_prompt(claim: &ClaimRecord) -> String {
    let claim_json = serde_json::to_string_pretty(claim).unwrap_or_else(|_| format!("{:?}", claim));

    format!(
        r#"System Instruction: You are an expert assistant for robotic process automation in medical claims processing. Analyze the single medical claim below and answer with a structured JSON object.

Claim Data:
{claim_json}

Perform these checks:
1. Data Validation: list missing or incorrectly formatted fields. If status is 'Approved', 'approval_date' must be present. 'date_of_service', 'submitted_date', and 'approval_date' must be valid dates. Return an empty array when there are no errors.
2. Risk Assessment: classify the risk level as 'Low', 'Medium', or 'High'. Claims with 'claim_amount' above {threshold} or surgical 'procedure_code' values (CPT codes {surgical_start}-{surgical_end}) are high risk.
3. Workflow Assignment: suggest a department for review, for example 'Auto-Approval', 'Standard Review', 'Surgical Claims Audit', or 'High-Value Claim Review'.

Respond ONLY with one valid JSON object in exactly this format, with no other text, explanation, or markdown fences:

{{
  "validationErrors": ["Error message 1 if any", "Error message 2 if any"],
  "riskLevel": "Low | Medium | High",
  "suggestedWorkflow": "Suggested Department"
}}"#,
        claim_json = claim_json,
        threshold = HIGH_VALUE_THRESHOLD,
        surgical_start = SURGICAL_CPT_RANGE.start(),
        surgical_end = SURGICAL_CPT_RANGE.end(),
    )
}

/// In-memory doubles for the enrichment seams
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Port that replays canned provider answers in order
    ///
    /// Once the script is exhausted every call fails with a connection error.
    #[derive(Debug)]
    pub struct MockAnalysisPort {
        configured: bool,
        responses: Mutex<VecDeque<Result<String, String>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl MockAnalysisPort {
        pub fn new(responses: Vec<Result<String, String>>) -> Self {
            Self {
                configured: true,
                responses: Mutex::new(responses.into()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        /// A port with no credential
        pub fn unconfigured() -> Self {
            Self {
                configured: false,
                ..Self::new(Vec::new())
            }
        }

        /// Prompts received so far
        pub fn prompts(&self) -> Vec<String> {
            self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
        }
    }

    impl DomainPort for MockAnalysisPort {}

    #[async_trait]
    impl AnalysisPort for MockAnalysisPort {
        fn is_configured(&self) -> bool {
            self.configured
        }

        async fn generate(&self, prompt: &str) -> Result<String, PortError> {
            if let Ok(mut prompts) = self.prompts.lock() {
                prompts.push(prompt.to_string());
            }
            let next = self
                .responses
                .lock()
                .ok()
                .and_then(|mut responses| responses.pop_front());
            match next {
                Some(Ok(text)) => Ok(text),
                Some(Err(message)) => Err(PortError::ServiceUnavailable { service: message }),
                None => Err(PortError::connection("mock script exhausted")),
            }
        }
    }

    /// Enricher that replays canned outcomes, keyed by call order
    ///
    /// `None` entries simulate a failed call. Once the script is exhausted
    /// every call returns a low-risk clean analysis.
    #[derive(Debug)]
    pub struct MockEnricher {
        available: bool,
        outcomes: Mutex<VecDeque<Option<AnalysisResult>>>,
        calls: Mutex<Vec<String>>,
    }

    impl MockEnricher {
        pub fn new(outcomes: Vec<Option<AnalysisResult>>) -> Self {
            Self {
                available: true,
                outcomes: Mutex::new(outcomes.into()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn unavailable() -> Self {
            Self {
                available: false,
                ..Self::new(Vec::new())
            }
        }

        /// Claim ids passed to `enrich`, in call order
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().map(|c| c.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl ClaimEnricher for MockEnricher {
        fn is_available(&self) -> bool {
            self.available
        }

        async fn enrich(&self, claim: &ClaimRecord) -> Result<AnalysisResult, EnrichmentError> {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push(claim.claim_id.clone());
            }
            let next = self
                .outcomes
                .lock()
                .ok()
                .and_then(|mut outcomes| outcomes.pop_front());
            match next {
                Some(Some(analysis)) => Ok(analysis),
                Some(None) => Err(EnrichmentError::Provider(PortError::internal(
                    "scripted enrichment failure",
                ))),
                None => Ok(AnalysisResult::new(
                    Vec::new(),
                    crate::analysis::RiskLevel::Low,
                    "Auto-Approval",
                )),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockAnalysisPort;
    use super::*;
    use crate::analysis::RiskLevel;

    fn record() -> ClaimRecord {
        ClaimRecord {
            claim_id: "C1".to_string(),
            provider_name: "Acme Clinic".to_string(),
            claim_amount: "500".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_well_formed_answer() {
        let port = MockAnalysisPort::new(vec![Ok(
            r#"{"validationErrors":[],"riskLevel":"Low","suggestedWorkflow":"Auto-Approval"}"#
                .to_string(),
        )]);
        let client = EnrichmentClient::new(Arc::new(port));
        let analysis = client.enrich(&record()).await.unwrap();
        assert_eq!(analysis.risk_level, RiskLevel::Low);
        assert_eq!(analysis.suggested_workflow, "Auto-Approval");
    }

    #[tokio::test]
    async fn test_fenced_answer() {
        let port = MockAnalysisPort::new(vec![Ok(
            "```json\n{\"validationErrors\":[\"Missing approval_date\"],\"riskLevel\":\"Medium\",\"suggestedWorkflow\":\"Standard Review\"}\n```"
                .to_string(),
        )]);
        let client = EnrichmentClient::new(Arc::new(port));
        let analysis = client.enrich(&record()).await.unwrap();
        assert_eq!(analysis.validation_errors, vec!["Missing approval_date"]);
        assert_eq!(analysis.risk_level, RiskLevel::Medium);
    }

    #[tokio::test]
    async fn test_provider_failure_degrades_to_fallback() {
        let port = MockAnalysisPort::new(vec![Err("quota".to_string())]);
        let client = EnrichmentClient::new(Arc::new(port));
        let analysis = client.enrich(&record()).await.unwrap();
        assert_eq!(analysis, AnalysisResult::analysis_failed());
    }

    #[tokio::test]
    async fn test_malformed_answer_is_an_error() {
        let port = MockAnalysisPort::new(vec![Ok("I cannot help with that".to_string())]);
        let client = EnrichmentClient::new(Arc::new(port));
        let result = client.enrich(&record()).await;
        assert!(matches!(result, Err(EnrichmentError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_unconfigured_port_is_unavailable() {
        let port = Arc::new(MockAnalysisPort::unconfigured());
        let client = EnrichmentClient::new(port.clone());
        assert!(!client.is_available());
        let result = client.enrich(&record()).await;
        assert!(matches!(result, Err(EnrichmentError::Unavailable)));
        assert!(port.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_prompt_embeds_claim() {
        let port = Arc::new(MockAnalysisPort::new(vec![Ok("{}".to_string())]));
        let client = EnrichmentClient::new(port.clone());
        let _ = client.enrich(&record()).await;

        let prompts = port.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("\"claim_id\": \"C1\""));
        assert!(prompts[0].contains("\"provider_name\": \"Acme Clinic\""));
        assert!(prompts[0].contains("10000-69999"));
        assert!(prompts[0].contains("\"riskLevel\": \"Low | Medium | High\""));
    }
}
