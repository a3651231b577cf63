//! Per-claim processing state within a batch run

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisResult;
use crate::claim::ClaimRecord;
use crate::error::ClaimError;

/// Enrichment progress of one claim
///
/// Moves strictly `Pending -> Processing -> Done | Error` and never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingState {
    Pending,
    Processing,
    Done,
    Error,
}

impl ProcessingState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProcessingState::Done | ProcessingState::Error)
    }

    fn can_transition_to(&self, target: ProcessingState) -> bool {
        use ProcessingState::*;
        matches!(
            (self, target),
            (Pending, Processing) | (Processing, Done) | (Processing, Error)
        )
    }
}

impl fmt::Display for ProcessingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProcessingState::Pending => "pending",
            ProcessingState::Processing => "processing",
            ProcessingState::Done => "done",
            ProcessingState::Error => "error",
        };
        f.write_str(label)
    }
}

/// A claim record plus its batch position, state, and analysis
///
/// The analysis is present exactly when the state is terminal; the
/// transition methods are the only way to change either.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedClaim {
    id: usize,
    #[serde(flatten)]
    record: ClaimRecord,
    #[serde(rename = "processingState")]
    state: ProcessingState,
    #[serde(rename = "aiAnalysis")]
    analysis: Option<AnalysisResult>,
}

impl EnrichedClaim {
    /// A freshly ingested claim at row index `id`
    pub fn pending(id: usize, record: ClaimRecord) -> Self {
        Self {
            id,
            record,
            state: ProcessingState::Pending,
            analysis: None,
        }
    }

    /// Rebuilds a claim from externally supplied parts
    ///
    /// # Errors
    ///
    /// Returns [`ClaimError::InvalidStateTransition`] when the analysis is
    /// present for a non-terminal state or missing for a terminal one.
    pub fn from_parts(
        id: usize,
        record: ClaimRecord,
        state: ProcessingState,
        analysis: Option<AnalysisResult>,
    ) -> Result<Self, ClaimError> {
        if state.is_terminal() != analysis.is_some() {
            return Err(ClaimError::InvalidStateTransition {
                id,
                from: state.to_string(),
                to: if analysis.is_some() { "analysed" } else { "unanalysed" }.to_string(),
            });
        }
        Ok(Self {
            id,
            record,
            state,
            analysis,
        })
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn record(&self) -> &ClaimRecord {
        &self.record
    }

    pub fn state(&self) -> ProcessingState {
        self.state
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    /// High risk or with validation errors; false until analysed
    pub fn needs_attention(&self) -> bool {
        self.analysis.as_ref().is_some_and(AnalysisResult::needs_attention)
    }

    /// `Pending -> Processing`
    pub fn begin_processing(&mut self) -> Result<(), ClaimError> {
        self.transition(ProcessingState::Processing)
    }

    /// `Processing -> Done` with the provider's analysis
    pub fn complete(&mut self, analysis: AnalysisResult) -> Result<(), ClaimError> {
        self.transition(ProcessingState::Done)?;
        self.analysis = Some(analysis);
        Ok(())
    }

    /// `Processing -> Error` with the fixed processing fallback
    pub fn fail(&mut self) -> Result<(), ClaimError> {
        self.transition(ProcessingState::Error)?;
        self.analysis = Some(AnalysisResult::processing_failed());
        Ok(())
    }

    fn transition(&mut self, target: ProcessingState) -> Result<(), ClaimError> {
        if !self.state.can_transition_to(target) {
            return Err(ClaimError::InvalidStateTransition {
                id: self.id,
                from: self.state.to_string(),
                to: target.to_string(),
            });
        }
        self.state = target;
        Ok(())
    }
}
