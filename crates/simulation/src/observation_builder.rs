//! Builds the [`FacilitySnapshot`] after every tick.

use bevy::prelude::*;

use crate::alerts::AlertBoard;
use crate::batches::BatchLedger;
use crate::clock::FacilityClock;
use crate::deferred::{OpKind, PendingOps, SampleAnalysis};
use crate::facility_actions::ActionResultLog;
use crate::marketplace::{board_stats, buyer_listings, BuyerQuery, ListingBoard};
use crate::observation::{ActionResultEntry, BatchSummary, FacilitySnapshot};
use crate::stats::FacilityStatsBoard;
use crate::TickCounter;

/// How many recent action results ride along in the snapshot.
const RECENT_RESULTS: usize = 8;

/// The latest snapshot, replaced wholesale each tick (consumers never see a
/// half-updated view).
#[derive(Resource, Debug, Clone, Default)]
pub struct CurrentObservation {
    pub observation: FacilitySnapshot,
}

#[allow(clippy::too_many_arguments)]
pub fn build_observation(
    tick: Res<TickCounter>,
    clock: Res<FacilityClock>,
    ledger: Res<BatchLedger>,
    board: Res<ListingBoard>,
    stats_board: Res<FacilityStatsBoard>,
    alert_board: Res<AlertBoard>,
    analysis: Res<SampleAnalysis>,
    pending: Res<PendingOps>,
    log: Res<ActionResultLog>,
    mut current: ResMut<CurrentObservation>,
) {
    let recent_action_results = log
        .last_n(RECENT_RESULTS)
        .iter()
        .map(|(action, result)| ActionResultEntry {
            action_summary: action.summary(),
            success: result.is_success(),
        })
        .collect();

    current.observation = FacilitySnapshot {
        tick: tick.0,
        day: clock.day(),
        clock: clock.formatted(),
        speed: clock.speed,
        paused: clock.paused,
        stats: stats_board.stats.clone(),
        marketplace: board_stats(&board.listings),
        batches: ledger.batches.iter().map(BatchSummary::from_batch).collect(),
        open_lots: buyer_listings(&board.listings, &BuyerQuery::default()),
        alerts: alert_board.alerts.clone(),
        sample_analysis: analysis.result.clone(),
        analysis_in_flight: pending.is_pending(&OpKind::AnalyzeSample),
        recent_action_results,
    };
}
