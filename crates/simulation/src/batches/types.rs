use bevy::prelude::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::marketplace::Material;

// =============================================================================
// Lifecycle
// =============================================================================

/// Processing lifecycle of a batch. Linear progression only; transitions
/// never skip a stage or move backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BatchStatus {
    Collected,
    Processing,
    Verified,
    ReadyForSale,
    Sold,
}

impl BatchStatus {
    /// Operator-facing label for this stage.
    pub fn label(self) -> &'static str {
        match self {
            BatchStatus::Collected => "Collected - in field / en route",
            BatchStatus::Processing => "MRF processing",
            BatchStatus::Verified => "Segregation verified",
            BatchStatus::ReadyForSale => "Ready for marketplace",
            BatchStatus::Sold => "Sold / dispatched",
        }
    }

    /// The next stage in the lifecycle, or `None` from the terminal stage.
    pub fn next(self) -> Option<BatchStatus> {
        match self {
            BatchStatus::Collected => Some(BatchStatus::Processing),
            BatchStatus::Processing => Some(BatchStatus::Verified),
            BatchStatus::Verified => Some(BatchStatus::ReadyForSale),
            BatchStatus::ReadyForSale => Some(BatchStatus::Sold),
            BatchStatus::Sold => None,
        }
    }

    /// Segregation-derived fields (score, quality alerts, averages) are only
    /// meaningful once the batch has entered processing.
    pub fn segregation_available(self) -> bool {
        !matches!(self, BatchStatus::Collected)
    }

    /// Batches in these stages may be promoted to the marketplace.
    pub fn market_eligible(self) -> bool {
        matches!(self, BatchStatus::Verified | BatchStatus::ReadyForSale)
    }

    /// Batches in these stages are offered for reward review.
    pub fn reward_eligible(self) -> bool {
        matches!(self, BatchStatus::ReadyForSale | BatchStatus::Sold)
    }
}

// =============================================================================
// Measurements
// =============================================================================

/// Material composition of a batch as percentage shares. Shares are expected
/// to sum to roughly 100 but this is not enforced; chart and listing math
/// normalize by the actual total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    pub plastic: f64,
    pub paper: f64,
    pub organic: f64,
    pub metal: f64,
}

impl Composition {
    pub fn share(&self, material: Material) -> f64 {
        match material {
            Material::Plastic => self.plastic,
            Material::Paper => self.paper,
            Material::Organic => self.organic,
            Material::Metal => self.metal,
        }
    }

    pub fn total(&self) -> f64 {
        self.plastic + self.paper + self.organic + self.metal
    }

    /// The composition channel with the largest share. Ties resolve in the
    /// fixed order Plastic > Paper > Organic > Metal.
    pub fn dominant_material(&self) -> Material {
        let mut best = Material::Plastic;
        for material in Material::ALL {
            if self.share(material) > self.share(best) {
                best = material;
            }
        }
        best
    }
}

/// A contributing source community whose waste forms part of a batch,
/// eligible for a proportional reward payout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocietyContribution {
    pub name: String,
    /// Segregation quality score for this society's contribution (0-100).
    pub score: u8,
    pub waste_kg: f64,
}

// =============================================================================
// Batch
// =============================================================================

/// One truck-load of collected waste tracked through the facility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub id: String,
    pub truck_id: String,
    pub zone: String,
    pub collected_at: DateTime<Utc>,
    pub status: BatchStatus,
    pub total_waste_kg: f64,
    /// Segregation quality score (0-100). Only meaningful once
    /// `status.segregation_available()`.
    pub segregation_score: u8,
    pub co2_saved_kg: f64,
    pub composition: Composition,
    pub societies: Vec<SocietyContribution>,
    /// Realized revenue, assigned when the batch sells.
    pub revenue: Option<f64>,
}

impl Batch {
    /// Advance one lifecycle stage. Returns the new status, or `None` when
    /// the batch is already terminal (the request is ignored, not applied).
    pub fn advance(&mut self) -> Option<BatchStatus> {
        let next = self.status.next()?;
        self.status = next;
        Some(next)
    }
}

// =============================================================================
// Ledger
// =============================================================================

/// All batches known to the facility, in collection order.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchLedger {
    pub batches: Vec<Batch>,
}

impl BatchLedger {
    pub fn get(&self, id: &str) -> Option<&Batch> {
        self.batches.iter().find(|b| b.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Batch> {
        self.batches.iter_mut().find(|b| b.id == id)
    }

    pub fn push(&mut self, batch: Batch) {
        self.batches.push(batch);
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }
}
