//! Deterministic demo data.
//!
//! Seeds the ledger with three canonical collection runs (fixed measurements,
//! one per early lifecycle stage) plus a seeded-RNG tail of further batches
//! and marketplace lots, so every marketplace and rewards surface has data to
//! show. The same seed always produces the same facility.

use bevy::prelude::*;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::batches::{Batch, BatchLedger, BatchStatus, Composition, SocietyContribution};
use crate::clock::FacilityClock;
use crate::marketplace::{promote_batch, ListingBoard};
use crate::sim_rng::SimRng;

/// Marker resource: insert before `SimulationPlugin` to start with an empty
/// facility (used by the test harness).
#[derive(Resource, Default)]
pub struct SkipDemoSeed;

const ZONES: [&str; 5] = [
    "Ward 7 - Kothrud",
    "Ward 3 - Baner",
    "Ward 5 - Hinjewadi",
    "Ward 2 - Aundh",
    "Ward 9 - Kharadi",
];

const SOCIETIES: [&str; 8] = [
    "Green Valley Housing Society",
    "Sunrise Residency",
    "Lakeview Apartments",
    "Baner Hillside Co-op",
    "Maple Grove Society",
    "Riverside Enclave",
    "Palm Meadows",
    "Silver Oak Towers",
];

const BUYERS: [&str; 3] = [
    "GreenPaper Recyclers",
    "CircularMetals Pvt Ltd",
    "EcoPaper Co",
];

fn society(name: &str, score: u8, waste_kg: f64) -> SocietyContribution {
    SocietyContribution {
        name: name.to_string(),
        score,
        waste_kg,
    }
}

/// The three flagship collection runs shown on the dashboard.
fn canonical_batches(epoch: DateTime<Utc>) -> Vec<Batch> {
    vec![
        Batch {
            id: "BATCH-001".to_string(),
            truck_id: "Car 1".to_string(),
            zone: ZONES[0].to_string(),
            collected_at: epoch - Duration::minutes(88), // 10:32
            status: BatchStatus::ReadyForSale,
            total_waste_kg: 245.8,
            segregation_score: 87,
            co2_saved_kg: 32.4,
            composition: Composition {
                plastic: 35.0,
                paper: 28.0,
                organic: 25.0,
                metal: 12.0,
            },
            societies: vec![
                society(SOCIETIES[0], 88, 96.0),
                society(SOCIETIES[1], 76, 81.5),
                society(SOCIETIES[2], 91, 68.3),
            ],
            revenue: None,
        },
        Batch {
            id: "BATCH-002".to_string(),
            truck_id: "Car 2".to_string(),
            zone: ZONES[1].to_string(),
            collected_at: epoch - Duration::minutes(170), // 09:10
            status: BatchStatus::Processing,
            total_waste_kg: 312.5,
            segregation_score: 92,
            co2_saved_kg: 41.2,
            composition: Composition {
                plastic: 40.0,
                paper: 22.0,
                organic: 28.0,
                metal: 10.0,
            },
            societies: vec![
                society(SOCIETIES[3], 94, 120.0),
                society(SOCIETIES[4], 79, 104.5),
                society(SOCIETIES[5], 85, 88.0),
            ],
            revenue: None,
        },
        Batch {
            id: "BATCH-003".to_string(),
            truck_id: "Car 3".to_string(),
            zone: ZONES[2].to_string(),
            collected_at: epoch - Duration::minutes(220), // 08:20, delayed
            status: BatchStatus::Collected,
            total_waste_kg: 189.3,
            segregation_score: 79,
            co2_saved_kg: 24.9,
            composition: Composition {
                plastic: 30.0,
                paper: 35.0,
                organic: 20.0,
                metal: 15.0,
            },
            // No society data configured yet; exercises the rewards no-data
            // path.
            societies: Vec::new(),
            revenue: None,
        },
    ]
}

/// Lifecycle stages for the RNG tail, cycled by batch index.
const TAIL_STATUSES: [BatchStatus; 7] = [
    BatchStatus::Verified,
    BatchStatus::ReadyForSale,
    BatchStatus::Sold,
    BatchStatus::ReadyForSale,
    BatchStatus::Verified,
    BatchStatus::Sold,
    BatchStatus::ReadyForSale,
];

fn tail_batch(index: usize, rng: &mut ChaCha8Rng, epoch: DateTime<Utc>) -> Batch {
    let number = index + 4; // BATCH-004 onward
    let total_waste_kg = rng.gen_range(150.0..350.0_f64);
    let plastic = f64::from(rng.gen_range(20..=40));
    let paper = f64::from(rng.gen_range(15..=30));
    let organic = f64::from(rng.gen_range(10..=25));
    let metal = 100.0 - plastic - paper - organic;

    let society_a = rng.gen_range(0..SOCIETIES.len());
    let society_b = (society_a + 1 + rng.gen_range(0..SOCIETIES.len() - 1)) % SOCIETIES.len();
    let split = rng.gen_range(0.35..0.65);

    Batch {
        id: format!("BATCH-{number:03}"),
        truck_id: format!("Car {number}"),
        zone: ZONES[number % ZONES.len()].to_string(),
        collected_at: epoch - Duration::minutes(rng.gen_range(60..300)),
        status: TAIL_STATUSES[index % TAIL_STATUSES.len()],
        total_waste_kg,
        segregation_score: rng.gen_range(70..=95),
        co2_saved_kg: total_waste_kg * rng.gen_range(0.11..0.15),
        composition: Composition {
            plastic,
            paper,
            organic,
            metal,
        },
        societies: vec![
            society(
                SOCIETIES[society_a],
                rng.gen_range(60..=95),
                total_waste_kg * split,
            ),
            society(
                SOCIETIES[society_b],
                rng.gen_range(60..=95),
                total_waste_kg * (1.0 - split),
            ),
        ],
        revenue: None,
    }
}

/// Populate the ledger and board. The canonical trio keeps its fixed
/// measurements; the tail is drawn from the RNG, with market-eligible tail
/// batches promoted and some of their lots reserved or sold.
pub fn seed_demo(
    ledger: &mut BatchLedger,
    board: &mut ListingBoard,
    rng: &mut ChaCha8Rng,
    epoch: DateTime<Utc>,
) {
    for batch in canonical_batches(epoch) {
        ledger.push(batch);
    }

    for index in 0..TAIL_STATUSES.len() {
        let mut batch = tail_batch(index, rng, epoch);
        let target = batch.status;

        // Sold tail batches pass through the marketplace on the way: list
        // them while still ready-for-sale, close the lot, then finish the
        // batch so its realized revenue matches its sold lot.
        if target == BatchStatus::Sold {
            batch.status = BatchStatus::ReadyForSale;
        }

        if batch.status.market_eligible() {
            if let Ok(listing_id) = promote_batch(board, &batch) {
                if target == BatchStatus::Sold {
                    let buyer = BUYERS[rng.gen_range(0..BUYERS.len())].to_string();
                    if let Some(listing) = board.get_mut(&listing_id) {
                        listing.sell(Some(buyer));
                        batch.revenue = Some(listing.lot_value());
                    }
                    batch.status = BatchStatus::Sold;
                } else if rng.gen_bool(0.25) {
                    if let Some(listing) = board.get_mut(&listing_id) {
                        listing.reserve(Some(
                            BUYERS[rng.gen_range(0..BUYERS.len())].to_string(),
                        ));
                    }
                }
            }
        }

        ledger.push(batch);
    }
}

/// Startup system: builds the default demo unless the harness opted out.
pub fn init_demo(
    mut ledger: ResMut<BatchLedger>,
    mut board: ResMut<ListingBoard>,
    mut rng: ResMut<SimRng>,
    clock: Res<FacilityClock>,
    skip: Option<Res<SkipDemoSeed>>,
) {
    if skip.is_some() {
        return;
    }
    let epoch = clock.epoch;
    seed_demo(&mut ledger, &mut board, &mut rng.0, epoch);
    info!(
        "demo facility seeded: {} batches, {} lots",
        ledger.len(),
        board.len()
    );
}
