use tracing::warn;

use crate::errors::ServiceError;
use crate::models::{BatchResult, ScoreResult};
use crate::session::selection::SelectionSet;

/// Handle for a dispatched batch scan. A newer dispatch supersedes older ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchTicket {
    generation: u64,
    pub storage_paths: Vec<String>,
}

/// In-flight and result state for the two scan flows.
///
/// The upload flow and the batch flow never share state: each has its own
/// `scanning` flag and its own last result.
#[derive(Debug, Clone, Default)]
pub struct EvaluationOrchestrator {
    upload_scanning: bool,
    upload_result: Option<ScoreResult>,
    batch_scanning: bool,
    batch_result: Option<BatchResult>,
    batch_generation: u64,
}

impl EvaluationOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    // ── single-document flow ────────────────────────────────────────────────

    /// Marks an upload as in flight and clears the previous result.
    /// Returns `false` when one is already running; nothing should be sent then.
    pub fn begin_upload(&mut self) -> bool {
        if self.upload_scanning {
            return false;
        }
        self.upload_scanning = true;
        self.upload_result = None;
        true
    }

    /// Stores the outcome of the upload. Transport and application failures
    /// both end up as a `ScoreResult` with `success: false`.
    pub fn finish_upload(&mut self, outcome: Result<ScoreResult, ServiceError>) {
        let result = outcome.unwrap_or_else(|e| {
            warn!("Upload scan failed: {e}");
            ScoreResult::failure(e.display_message())
        });
        self.upload_result = Some(result);
        self.upload_scanning = false;
    }

    pub fn is_upload_scanning(&self) -> bool {
        self.upload_scanning
    }

    pub fn upload_result(&self) -> Option<&ScoreResult> {
        self.upload_result.as_ref()
    }

    // ── batch flow ──────────────────────────────────────────────────────────

    /// Starts a batch for the current selection. An empty selection is a
    /// silent no-op: no ticket, previous results left alone.
    pub fn begin_batch(&mut self, selection: &SelectionSet) -> Option<BatchTicket> {
        if selection.is_empty() {
            return None;
        }
        self.batch_generation += 1;
        self.batch_scanning = true;
        self.batch_result = None;
        Some(BatchTicket {
            generation: self.batch_generation,
            storage_paths: selection.ids().to_vec(),
        })
    }

    /// Stores the batch outcome as returned (no re-ordering). Returns `false`
    /// and drops the outcome if a newer batch was dispatched in the meantime.
    pub fn finish_batch(
        &mut self,
        ticket: &BatchTicket,
        outcome: Result<BatchResult, ServiceError>,
    ) -> bool {
        if ticket.generation != self.batch_generation {
            return false;
        }
        let result = outcome.unwrap_or_else(|e| {
            warn!("Batch scan failed: {e}");
            BatchResult::failure(e.display_message())
        });
        self.batch_result = Some(result);
        self.batch_scanning = false;
        true
    }

    pub fn is_batch_scanning(&self) -> bool {
        self.batch_scanning
    }

    pub fn batch_result(&self) -> Option<&BatchResult> {
        self.batch_result.as_ref()
    }
}
