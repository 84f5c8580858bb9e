//! Drains the action queue each tick and applies each action against the
//! facility resources. Every outcome lands in the result log.

use bevy::prelude::*;

use crate::batches::{BatchLedger, BatchStatus};
use crate::clock::FacilityClock;
use crate::config::DEMO_BUYER;
use crate::deferred::{OpKind, PendingOps, SampleAnalysis};
use crate::demo_seed;
use crate::marketplace::ListingBoard;
use crate::sim_rng::SimRng;

use super::{ActionError, ActionQueue, ActionResult, ActionResultLog, OperatorAction};

#[allow(clippy::too_many_arguments)]
pub fn execute_queued_actions(
    mut queue: ResMut<ActionQueue>,
    mut log: ResMut<ActionResultLog>,
    mut ledger: ResMut<BatchLedger>,
    mut board: ResMut<ListingBoard>,
    mut pending: ResMut<PendingOps>,
    mut analysis: ResMut<SampleAnalysis>,
    mut clock: ResMut<FacilityClock>,
    mut rng: ResMut<SimRng>,
) {
    for queued in queue.drain() {
        let result = apply_action(
            &queued.action,
            &mut ledger,
            &mut board,
            &mut pending,
            &mut analysis,
            &mut clock,
            &mut rng,
        );
        if let ActionResult::Error(err) = &result {
            debug!("action {} rejected: {:?}", queued.action.summary(), err);
        }
        log.push(queued.action, result);
    }
}

fn apply_action(
    action: &OperatorAction,
    ledger: &mut BatchLedger,
    board: &mut ListingBoard,
    pending: &mut PendingOps,
    analysis: &mut SampleAnalysis,
    clock: &mut FacilityClock,
    rng: &mut SimRng,
) -> ActionResult {
    match action {
        OperatorAction::NewDemo { seed } => {
            *rng = SimRng::from_seed_u64(*seed);
            *ledger = BatchLedger::default();
            *board = ListingBoard::default();
            *pending = PendingOps::default();
            *analysis = SampleAnalysis::default();
            clock.elapsed_minutes = 0;
            clock.paused = false;
            clock.speed = 1.0;
            demo_seed::seed_demo(ledger, board, &mut rng.0, clock.epoch);
            ActionResult::Success
        }

        OperatorAction::SetPaused { paused } => {
            clock.paused = *paused;
            ActionResult::Success
        }

        OperatorAction::SetSpeed { speed } => {
            if !(0.25..=16.0).contains(speed) {
                return ActionResult::Error(ActionError::InvalidParameter(format!(
                    "speed {speed} outside 0.25-16.0"
                )));
            }
            clock.speed = *speed;
            ActionResult::Success
        }

        OperatorAction::AdvanceBatch { batch_id } => {
            let Some(batch) = ledger.get_mut(batch_id) else {
                return ActionResult::Error(ActionError::NotFound);
            };
            match batch.advance() {
                Some(status) => ActionResult::SuccessWithNote(format!(
                    "{batch_id} is now: {}",
                    status.label()
                )),
                None => ActionResult::Error(ActionError::InvalidTransition),
            }
        }

        OperatorAction::VerifyBatch { batch_id } => {
            let Some(batch) = ledger.get(batch_id) else {
                return ActionResult::Error(ActionError::NotFound);
            };
            if batch.status != BatchStatus::Processing {
                return ActionResult::Error(ActionError::NotEligible);
            }
            if pending.submit(OpKind::VerifySegregation {
                batch_id: batch_id.clone(),
            }) {
                ActionResult::Success
            } else {
                ActionResult::Error(ActionError::OperationInFlight)
            }
        }

        OperatorAction::ListBatchToMarket { batch_id } => {
            let Some(batch) = ledger.get(batch_id) else {
                return ActionResult::Error(ActionError::NotFound);
            };
            if !batch.status.market_eligible() {
                return ActionResult::Error(ActionError::NotEligible);
            }
            let material = batch.composition.dominant_material();
            if board.has_listing_for(batch_id, material) {
                return ActionResult::Error(ActionError::AlreadyListed);
            }
            if pending.submit(OpKind::ListBatch {
                batch_id: batch_id.clone(),
            }) {
                ActionResult::Success
            } else {
                ActionResult::Error(ActionError::OperationInFlight)
            }
        }

        OperatorAction::AnalyzeSample => {
            if pending.submit(OpKind::AnalyzeSample) {
                // Clear the previous estimate while inference runs.
                analysis.result = None;
                ActionResult::Success
            } else {
                ActionResult::Error(ActionError::OperationInFlight)
            }
        }

        OperatorAction::ReserveListing { listing_id, buyer } => {
            let Some(listing) = board.get_mut(listing_id) else {
                return ActionResult::Error(ActionError::NotFound);
            };
            let buyer = Some(buyer.clone().unwrap_or_else(|| DEMO_BUYER.to_string()));
            if listing.reserve(buyer) {
                ActionResult::Success
            } else {
                ActionResult::Error(ActionError::InvalidTransition)
            }
        }

        OperatorAction::PurchaseListing { listing_id, buyer } => {
            let Some(listing) = board.get_mut(listing_id) else {
                return ActionResult::Error(ActionError::NotFound);
            };
            let buyer = Some(buyer.clone().unwrap_or_else(|| DEMO_BUYER.to_string()));
            if !listing.sell(buyer) {
                return ActionResult::Error(ActionError::InvalidTransition);
            }
            let lot_value = listing.lot_value();
            let batch_id = listing.batch_id.clone();

            // Closing the lot completes the source batch's journey.
            if let Some(batch) = ledger.get_mut(&batch_id) {
                if batch.status == BatchStatus::ReadyForSale {
                    let _ = batch.advance();
                }
                if batch.revenue.is_none() {
                    batch.revenue = Some(lot_value);
                }
            }
            ActionResult::SuccessWithNote(format!("{listing_id} sold for {lot_value:.0}"))
        }

        OperatorAction::RequestQuote { listing_id } => {
            let Some(listing) = board.get_mut(listing_id) else {
                return ActionResult::Error(ActionError::NotFound);
            };
            if listing.reserve(None) {
                ActionResult::Success
            } else {
                ActionResult::Error(ActionError::InvalidTransition)
            }
        }
    }
}
