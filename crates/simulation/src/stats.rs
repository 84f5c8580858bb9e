//! Facility-wide aggregates for the summary cards.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::batches::{Batch, BatchLedger, BatchStatus};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FacilityStats {
    /// Sum of all inbound batch mass at the MRF.
    pub total_waste_kg: f64,
    /// Avoided vs landfill baseline, across all batches.
    pub total_co2_saved_kg: f64,
    /// Mean segregation score across batches with segregation data.
    /// `None` when no batch has reached processing yet.
    pub avg_segregation_score: Option<f32>,
    /// Batches anywhere short of sold.
    pub active_batches: u32,
    /// Batches sold and dispatched.
    pub completed_batches: u32,
}

/// Aggregate a batch collection. Pure; an empty collection yields zero sums
/// and no average.
pub fn compute_stats(batches: &[Batch]) -> FacilityStats {
    let total_waste_kg = batches.iter().map(|b| b.total_waste_kg).sum();
    let total_co2_saved_kg = batches.iter().map(|b| b.co2_saved_kg).sum();

    let scored: Vec<u8> = batches
        .iter()
        .filter(|b| b.status.segregation_available())
        .map(|b| b.segregation_score)
        .collect();
    let avg_segregation_score = if scored.is_empty() {
        None
    } else {
        let sum: u32 = scored.iter().map(|&s| u32::from(s)).sum();
        Some(sum as f32 / scored.len() as f32)
    };

    let completed_batches = batches
        .iter()
        .filter(|b| b.status == BatchStatus::Sold)
        .count() as u32;
    let active_batches = batches.len() as u32 - completed_batches;

    FacilityStats {
        total_waste_kg,
        total_co2_saved_kg,
        avg_segregation_score,
        active_batches,
        completed_batches,
    }
}

/// Resource holding the latest aggregates, refreshed each tick.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct FacilityStatsBoard {
    pub stats: FacilityStats,
}

pub fn update_stats(ledger: Res<BatchLedger>, mut board: ResMut<FacilityStatsBoard>) {
    board.stats = compute_stats(&ledger.batches);
}
