//! Proportional reward distribution for contributing societies.
//!
//! A batch's revenue (explicit, or mass at the default price when it has not
//! sold yet) is split into a facility-retained share and a reward pool; the
//! pool is distributed across the batch's societies weighted by quality
//! score. Payouts are rounded to whole currency units.

use serde::{Deserialize, Serialize};

use crate::batches::{Batch, SocietyContribution};
use crate::config::{DEFAULT_PRICE_PER_KG, RELEASE_SCORE_THRESHOLD, REWARD_POOL_FRACTION};

/// Display classification of a payout. Not a lifecycle state: nothing is
/// persisted or transitioned, high-scoring societies are simply shown as
/// already released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayoutStatus {
    Released,
    Pending,
}

/// One society's slice of the reward pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocietyReward {
    pub name: String,
    pub score: u8,
    pub waste_kg: f64,
    /// Whole currency units; no sub-unit fractions are paid out.
    pub reward: i64,
    pub payout: PayoutStatus,
}

/// Full reward picture for one batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardBreakdown {
    pub batch_id: String,
    pub revenue: f64,
    pub pool: f64,
    pub facility_retained: f64,
    /// Empty when the batch has no society data configured.
    pub shares: Vec<SocietyReward>,
}

/// Revenue figure used for reward math: the realized revenue when the batch
/// has sold, otherwise its mass at the default per-kg price.
pub fn batch_revenue(batch: &Batch) -> f64 {
    batch
        .revenue
        .unwrap_or(batch.total_waste_kg * DEFAULT_PRICE_PER_KG)
}

/// Split a reward pool across societies proportionally to quality score.
///
/// A zero score total (including the no-societies case) yields zero rewards
/// for everyone rather than dividing by zero.
pub fn split_pool(pool: f64, societies: &[SocietyContribution]) -> Vec<SocietyReward> {
    let total_score: u32 = societies.iter().map(|s| u32::from(s.score)).sum();
    societies
        .iter()
        .map(|s| {
            let reward = if total_score == 0 {
                0
            } else {
                (pool * f64::from(s.score) / f64::from(total_score)).round() as i64
            };
            SocietyReward {
                name: s.name.clone(),
                score: s.score,
                waste_kg: s.waste_kg,
                reward,
                payout: if s.score > RELEASE_SCORE_THRESHOLD {
                    PayoutStatus::Released
                } else {
                    PayoutStatus::Pending
                },
            }
        })
        .collect()
}

/// Compute the full reward breakdown for a batch.
pub fn allocate_rewards(batch: &Batch) -> RewardBreakdown {
    let revenue = batch_revenue(batch);
    let pool = revenue * REWARD_POOL_FRACTION;
    RewardBreakdown {
        batch_id: batch.id.clone(),
        revenue,
        pool,
        facility_retained: revenue - pool,
        shares: split_pool(pool, &batch.societies),
    }
}
