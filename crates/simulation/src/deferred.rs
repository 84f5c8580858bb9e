//! Simulated asynchronous operations.
//!
//! The facility's remote calls (marketplace publishing, supervisor sign-off,
//! vision inference) are simulated with fixed sub-second delays. Each such
//! call is an explicit deferred operation: submitted once,
//! counted down in whole FixedUpdate ticks, completed exactly once, never
//! cancelled. Tests drive completion by ticking the app, so no wall-clock
//! sleeps are involved.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::batches::{BatchLedger, BatchStatus, Composition};
use crate::marketplace::{promote_batch, ListingBoard, PromotionError};

/// "Listing to marketplace..." delay: 900 ms at the 10 Hz fixed step.
pub const LIST_TO_MARKET_DELAY_TICKS: u32 = 9;
/// Supervisor verification delay: 800 ms.
pub const VERIFY_DELAY_TICKS: u32 = 8;
/// Vision-model inference delay: 1100 ms.
pub const SAMPLE_ANALYSIS_DELAY_TICKS: u32 = 11;

/// What a deferred operation does when it completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpKind {
    /// Promote the batch onto the marketplace board.
    ListBatch { batch_id: String },
    /// Advance the batch from Processing to Verified.
    VerifySegregation { batch_id: String },
    /// Run the simulated segregation vision model on an uploaded sample.
    AnalyzeSample,
}

impl OpKind {
    pub fn delay_ticks(&self) -> u32 {
        match self {
            OpKind::ListBatch { .. } => LIST_TO_MARKET_DELAY_TICKS,
            OpKind::VerifySegregation { .. } => VERIFY_DELAY_TICKS,
            OpKind::AnalyzeSample => SAMPLE_ANALYSIS_DELAY_TICKS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeferredOp {
    pub kind: OpKind,
    pub remaining_ticks: u32,
}

/// In-flight deferred operations. At most one per kind+target.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct PendingOps {
    pub ops: Vec<DeferredOp>,
}

impl PendingOps {
    /// Queue an operation with its fixed delay. Returns false (and queues
    /// nothing) when the same operation is already in flight.
    pub fn submit(&mut self, kind: OpKind) -> bool {
        if self.is_pending(&kind) {
            return false;
        }
        let remaining_ticks = kind.delay_ticks();
        self.ops.push(DeferredOp {
            kind,
            remaining_ticks,
        });
        true
    }

    pub fn is_pending(&self, kind: &OpKind) -> bool {
        self.ops.iter().any(|op| &op.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// Fired on the tick an operation's countdown reaches zero.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct OpCompleted {
    pub kind: OpKind,
}

// =============================================================================
// Sample analysis
// =============================================================================

/// Output of the simulated vision model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub score: u8,
    pub composition: Composition,
}

/// The model is entirely simulated: every run returns this fixed estimate.
pub fn mock_vision_result() -> AnalysisResult {
    AnalysisResult {
        score: 84,
        composition: Composition {
            plastic: 38.0,
            paper: 27.0,
            organic: 23.0,
            metal: 12.0,
        },
    }
}

/// Latest vision-model output, cleared while a new analysis is in flight.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct SampleAnalysis {
    pub result: Option<AnalysisResult>,
}

// =============================================================================
// Systems
// =============================================================================

/// Counts down in-flight operations and emits a completion event for each
/// one that reaches zero. Completed operations leave the pending list in the
/// same tick, so each completes exactly once.
pub fn tick_pending_ops(mut pending: ResMut<PendingOps>, mut completed: EventWriter<OpCompleted>) {
    for op in &mut pending.ops {
        op.remaining_ticks = op.remaining_ticks.saturating_sub(1);
    }
    let done: Vec<OpKind> = pending
        .ops
        .iter()
        .filter(|op| op.remaining_ticks == 0)
        .map(|op| op.kind.clone())
        .collect();
    pending.ops.retain(|op| op.remaining_ticks > 0);
    for kind in done {
        completed.send(OpCompleted { kind });
    }
}

/// Applies the state change for each completed operation.
///
/// State may have moved while an operation was in flight (e.g. the batch was
/// already listed by hand); completions then log and change nothing instead
/// of faulting.
pub fn apply_completed_ops(
    mut completed: EventReader<OpCompleted>,
    mut ledger: ResMut<BatchLedger>,
    mut board: ResMut<ListingBoard>,
    mut analysis: ResMut<SampleAnalysis>,
) {
    for event in completed.read() {
        match &event.kind {
            OpKind::ListBatch { batch_id } => {
                let Some(batch) = ledger.get_mut(batch_id) else {
                    warn!("ListBatch completed for unknown batch {batch_id}");
                    continue;
                };
                match promote_batch(&mut board, batch) {
                    Ok(listing_id) => {
                        info!("{batch_id} listed to marketplace as {listing_id}");
                        if batch.status == BatchStatus::Verified {
                            let _ = batch.advance();
                        }
                    }
                    Err(PromotionError::AlreadyListed) => {
                        warn!("{batch_id} already has a lot for its dominant material");
                    }
                    Err(PromotionError::NotEligible) => {
                        warn!("{batch_id} left the market-eligible stages before listing");
                    }
                }
            }
            OpKind::VerifySegregation { batch_id } => {
                let Some(batch) = ledger.get_mut(batch_id) else {
                    warn!("VerifySegregation completed for unknown batch {batch_id}");
                    continue;
                };
                if batch.status == BatchStatus::Processing {
                    let _ = batch.advance();
                    info!("{batch_id} segregation verified");
                } else {
                    warn!("{batch_id} is no longer in processing; verification skipped");
                }
            }
            OpKind::AnalyzeSample => {
                analysis.result = Some(mock_vision_result());
                info!("sample analysis complete");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_sets_fixed_delay() {
        let mut pending = PendingOps::default();
        assert!(pending.submit(OpKind::AnalyzeSample));
        assert_eq!(pending.ops[0].remaining_ticks, SAMPLE_ANALYSIS_DELAY_TICKS);
    }

    #[test]
    fn test_duplicate_submission_is_rejected() {
        let mut pending = PendingOps::default();
        let kind = OpKind::ListBatch {
            batch_id: "BATCH-001".to_string(),
        };
        assert!(pending.submit(kind.clone()));
        assert!(!pending.submit(kind.clone()));
        assert_eq!(pending.len(), 1);
        assert!(pending.is_pending(&kind));
    }

    #[test]
    fn test_same_kind_different_target_may_coexist() {
        let mut pending = PendingOps::default();
        assert!(pending.submit(OpKind::ListBatch {
            batch_id: "BATCH-001".to_string(),
        }));
        assert!(pending.submit(OpKind::ListBatch {
            batch_id: "BATCH-002".to_string(),
        }));
        assert_eq!(pending.len(), 2);
    }

    #[test]
    fn test_delays_match_the_simulated_api_waits() {
        // 10 Hz fixed step: one tick per 100 ms.
        assert_eq!(
            OpKind::ListBatch {
                batch_id: String::new()
            }
            .delay_ticks(),
            9
        );
        assert_eq!(
            OpKind::VerifySegregation {
                batch_id: String::new()
            }
            .delay_ticks(),
            8
        );
        assert_eq!(OpKind::AnalyzeSample.delay_ticks(), 11);
    }

    #[test]
    fn test_mock_vision_result_is_fixed() {
        let result = mock_vision_result();
        assert_eq!(result.score, 84);
        assert_eq!(result.composition.plastic, 38.0);
        assert_eq!(result.composition.paper, 27.0);
        assert_eq!(result.composition.organic, 23.0);
        assert_eq!(result.composition.metal, 12.0);
    }
}
