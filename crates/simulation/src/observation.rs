//! Compact, typed, serializable snapshot of the facility state.
//!
//! [`FacilitySnapshot`] is what the console (and any front end built on it)
//! renders: summary cards, the fleet panel, the buyer marketplace, alerts,
//! and recent action outcomes, captured together after each tick.

use serde::{Deserialize, Serialize};

use crate::alerts::Alert;
use crate::batches::{Batch, BatchStatus};
use crate::deferred::AnalysisResult;
use crate::marketplace::{Listing, MarketplaceStats};
use crate::stats::FacilityStats;

/// A point-in-time snapshot of the entire facility.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FacilitySnapshot {
    // -- Time ---------------------------------------------------------------
    pub tick: u64,
    pub day: u32,
    pub clock: String,
    pub speed: f32,
    pub paused: bool,

    // -- Aggregates ---------------------------------------------------------
    pub stats: FacilityStats,
    pub marketplace: MarketplaceStats,

    // -- Fleet --------------------------------------------------------------
    pub batches: Vec<BatchSummary>,

    // -- Buyer-visible lots (default query: all available) -------------------
    pub open_lots: Vec<Listing>,

    // -- Attention ----------------------------------------------------------
    pub alerts: Vec<Alert>,

    // -- AI panel -----------------------------------------------------------
    pub sample_analysis: Option<AnalysisResult>,
    pub analysis_in_flight: bool,

    // -- Recent action results ----------------------------------------------
    pub recent_action_results: Vec<ActionResultEntry>,
}

/// One fleet-panel row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub id: String,
    pub truck_id: String,
    pub zone: String,
    pub status: BatchStatus,
    pub status_label: String,
    pub collected_at: String,
    pub total_waste_kg: f64,
    pub segregation_score: u8,
    pub co2_saved_kg: f64,
    pub society_count: u32,
}

impl BatchSummary {
    pub fn from_batch(batch: &Batch) -> Self {
        Self {
            id: batch.id.clone(),
            truck_id: batch.truck_id.clone(),
            zone: batch.zone.clone(),
            status: batch.status,
            status_label: batch.status.label().to_string(),
            collected_at: batch.collected_at.to_rfc3339(),
            total_waste_kg: batch.total_waste_kg,
            segregation_score: batch.segregation_score,
            co2_saved_kg: batch.co2_saved_kg,
            society_count: batch.societies.len() as u32,
        }
    }
}

/// Compact summary of a recently executed action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResultEntry {
    pub action_summary: String,
    pub success: bool,
}
