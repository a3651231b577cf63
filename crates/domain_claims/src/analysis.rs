//! AI-derived analysis attached to a claim
//!
//! The provider answers with a single JSON object, sometimes wrapped in a
//! markdown code fence. [`decode_analysis`] strips the fence and accepts the
//! object only when all three judgments are present.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EnrichmentError;

/// Risk classification of a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Parses a provider label, ignoring case and surrounding whitespace
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "low" => Some(RiskLevel::Low),
            "medium" => Some(RiskLevel::Medium),
            "high" => Some(RiskLevel::High),
            _ => None,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        };
        f.write_str(label)
    }
}

/// Validation, risk, and routing judgments for one claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Human-readable problems, empty when the claim looks clean
    pub validation_errors: Vec<String>,
    pub risk_level: RiskLevel,
    /// Department or queue the claim should be routed to
    pub suggested_workflow: String,
}

impl AnalysisResult {
    pub fn new(
        validation_errors: Vec<String>,
        risk_level: RiskLevel,
        suggested_workflow: impl Into<String>,
    ) -> Self {
        Self {
            validation_errors,
            risk_level,
            suggested_workflow: suggested_workflow.into(),
        }
    }

    /// Result returned by the enrichment client when the provider call fails
    pub fn analysis_failed() -> Self {
        Self::new(
            vec!["AI analysis failed.".to_string()],
            RiskLevel::High,
            "Manual Review Required",
        )
    }

    /// Result attached by the pipeline when enrichment yields no analysis
    pub fn processing_failed() -> Self {
        Self::new(
            vec!["AI Processing Failed".to_string()],
            RiskLevel::High,
            "Manual Review",
        )
    }

    pub fn is_high_risk(&self) -> bool {
        self.risk_level == RiskLevel::High
    }

    pub fn has_validation_errors(&self) -> bool {
        !self.validation_errors.is_empty()
    }

    /// High risk or carrying validation errors
    pub fn needs_attention(&self) -> bool {
        self.is_high_risk() || self.has_validation_errors()
    }
}

/// Shape of the provider answer before the required fields are checked
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAnalysis {
    validation_errors: Option<Vec<String>>,
    risk_level: Option<String>,
    suggested_workflow: Option<String>,
}

/// Removes a surrounding markdown code fence, with or without a language tag
///
/// Text without a complete fence, or whose fence wraps nothing, is returned
/// trimmed but otherwise unchanged.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(inner) = trimmed
        .strip_prefix("```")
        .and_then(|rest| rest.strip_suffix("```"))
    else {
        return trimmed;
    };

    let body = inner
        .trim_start_matches(|c: char| c.is_alphanumeric() || c == '_')
        .trim();
    if body.is_empty() {
        trimmed
    } else {
        body
    }
}

/// Decodes a provider response into an [`AnalysisResult`]
///
/// # Errors
///
/// Returns [`EnrichmentError::MalformedResponse`] when the body is not a JSON
/// object, when `validationErrors` is missing, or when `riskLevel` or
/// `suggestedWorkflow` is missing, blank, or (for the risk) not one of
/// Low, Medium, High.
pub fn decode_analysis(raw: &str) -> Result<AnalysisResult, EnrichmentError> {
    let body = strip_code_fence(raw);
    let parsed: RawAnalysis = serde_json::from_str(body)
        .map_err(|e| EnrichmentError::MalformedResponse(format!("invalid JSON: {}", e)))?;

    let validation_errors = parsed
        .validation_errors
        .ok_or_else(|| missing("validationErrors"))?;

    let risk_label = parsed
        .risk_level
        .filter(|label| !label.trim().is_empty())
        .ok_or_else(|| missing("riskLevel"))?;
    let risk_level = RiskLevel::from_label(&risk_label).ok_or_else(|| {
        EnrichmentError::MalformedResponse(format!("unknown riskLevel '{}'", risk_label))
    })?;

    let suggested_workflow = parsed
        .suggested_workflow
        .filter(|workflow| !workflow.trim().is_empty())
        .ok_or_else(|| missing("suggestedWorkflow"))?;

    Ok(AnalysisResult {
        validation_errors,
        risk_level,
        suggested_workflow,
    })
}

fn missing(field: &str) -> EnrichmentError {
    EnrichmentError::MalformedResponse(format!("missing field '{}'", field))
}
