//! Sequential claims processing pipeline
//!
//! Drives a batch through enrichment one claim at a time, in row order.
//! The pipeline owns the batch for the duration of [`ClaimsPipeline::process`],
//! hands an immutable [`BatchSnapshot`] to the observer after every state
//! change, and gives the batch back when every claim is Done or Error.
//!
//! ```text
//! for each claim:  Pending ──▶ Processing ──▶ Done | Error
//!                        snapshot        snapshot
//! ```
//!
//! Claim `i + 1` is never started before claim `i` is terminal, which keeps
//! progress deterministic and the provider call rate at one in flight.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, info_span, warn, Instrument};

use core_kernel::BatchId;

use crate::enrichment::ClaimEnricher;
use crate::error::ClaimError;
use crate::processing::{EnrichedClaim, ProcessingState};

/// Full batch state after one step
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSnapshot {
    pub batch_id: BatchId,
    /// Every claim, in original row order
    pub claims: Vec<EnrichedClaim>,
    /// Id of the claim whose state just changed
    pub current: usize,
    /// Claims in a terminal state
    pub completed: usize,
    pub total: usize,
}

impl BatchSnapshot {
    pub fn is_finished(&self) -> bool {
        self.completed == self.total
    }
}

/// Receives batch snapshots while a batch is processed
pub trait ProgressObserver: Send {
    fn on_snapshot(&mut self, snapshot: BatchSnapshot);
}

impl<F> ProgressObserver for F
where
    F: FnMut(BatchSnapshot) + Send,
{
    fn on_snapshot(&mut self, snapshot: BatchSnapshot) {
        self(snapshot)
    }
}

/// Observer that ignores every snapshot
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {
    fn on_snapshot(&mut self, _snapshot: BatchSnapshot) {}
}

/// Forwards snapshots into an unbounded tokio channel
///
/// A dropped receiver is not an error; snapshots are simply discarded.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    sender: UnboundedSender<BatchSnapshot>,
}

impl ChannelObserver {
    pub fn new(sender: UnboundedSender<BatchSnapshot>) -> Self {
        Self { sender }
    }
}

impl ProgressObserver for ChannelObserver {
    fn on_snapshot(&mut self, snapshot: BatchSnapshot) {
        let _ = self.sender.send(snapshot);
    }
}

/// Sequential enrichment driver
pub struct ClaimsPipeline {
    enricher: Arc<dyn ClaimEnricher>,
}

impl ClaimsPipeline {
    pub fn new(enricher: Arc<dyn ClaimEnricher>) -> Self {
        Self { enricher }
    }

    /// Whether the underlying enricher can be invoked
    pub fn is_available(&self) -> bool {
        self.enricher.is_available()
    }

    /// Processes every pending claim in row order
    ///
    /// Claims already in a terminal state are carried through untouched.
    /// Per-claim failures are recorded on the claim (state `Error`, fixed
    /// processing fallback) and never abort the batch.
    ///
    /// # Errors
    ///
    /// - [`ClaimError::NothingToProcess`] for an empty batch
    /// - [`ClaimError::ClientUnavailable`] when the enricher is unavailable
    ///
    /// Both are checked before any claim is touched.
    pub async fn process(
        &self,
        claims: Vec<EnrichedClaim>,
        observer: &mut dyn ProgressObserver,
    ) -> Result<Vec<EnrichedClaim>, ClaimError> {
        if claims.is_empty() {
            return Err(ClaimError::NothingToProcess);
        }
        if !self.enricher.is_available() {
            return Err(ClaimError::ClientUnavailable);
        }

        let batch_id = BatchId::new_v7();
        let span = info_span!("claims_batch", batch_id = %batch_id, total = claims.len());
        self.run(batch_id, claims, observer).instrument(span).await
    }

    async fn run(
        &self,
        batch_id: BatchId,
        mut claims: Vec<EnrichedClaim>,
        observer: &mut dyn ProgressObserver,
    ) -> Result<Vec<EnrichedClaim>, ClaimError> {
        let total = claims.len();
        info!("Starting claims batch");

        for index in 0..total {
            let id = claims[index].id();
            let state = claims[index].state();
            if state.is_terminal() {
                debug!(row = index, state = %state, "Skipping claim already processed");
                continue;
            }
            if state == ProcessingState::Pending {
                claims[index].begin_processing()?;
                emit(observer, batch_id, &claims, id);
            }

            let claim = &mut claims[index];
            debug!(row = index, claim_id = %claim.record().claim_id, "Enriching claim");

            match self.enricher.enrich(claim.record()).await {
                Ok(analysis) => claim.complete(analysis)?,
                Err(error) => {
                    warn!(
                        row = index,
                        claim_id = %claim.record().claim_id,
                        error = %error,
                        "Claim enrichment failed, marking claim as error"
                    );
                    claim.fail()?;
                }
            }
            emit(observer, batch_id, &claims, id);
        }

        let errors = claims
            .iter()
            .filter(|c| c.state() == ProcessingState::Error)
            .count();
        info!(done = total - errors, errors, "Claims batch complete");

        Ok(claims)
    }
}

fn emit(
    observer: &mut dyn ProgressObserver,
    batch_id: BatchId,
    claims: &[EnrichedClaim],
    current: usize,
) {
    let completed = claims.iter().filter(|c| c.state().is_terminal()).count();
    observer.on_snapshot(BatchSnapshot {
        batch_id,
        claims: claims.to_vec(),
        current,
        completed,
        total: claims.len(),
    });
}
