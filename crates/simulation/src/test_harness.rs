//! # TestFacility: headless integration test harness
//!
//! Wraps `bevy::app::App` + `SimulationPlugin` so integration tests can set
//! up facility state, advance fixed-update ticks deterministically, and
//! assert on the resulting resources without a window or renderer.

use bevy::app::App;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use chrono::Duration;

use crate::alerts::AlertBoard;
use crate::batches::{Batch, BatchLedger, BatchStatus, Composition};
use crate::clock::FacilityClock;
use crate::demo_seed::SkipDemoSeed;
use crate::facility_actions::{
    ActionQueue, ActionResult, ActionResultLog, ActionSource, OperatorAction,
};
use crate::marketplace::ListingBoard;
use crate::observation::FacilitySnapshot;
use crate::observation_builder::CurrentObservation;
use crate::sim_rng::SimRng;
use crate::stats::FacilityStatsBoard;
use crate::SimulationPlugin;
use crate::TickCounter;

/// A headless Bevy App wrapping `SimulationPlugin` for integration testing.
pub struct TestFacility {
    app: App,
}

/// Switch the app to a deterministic clock: every `app.update()` advances
/// virtual time by one 100 ms fixed step, so `FixedUpdate` runs exactly once
/// per tick instead of being driven by the real wall clock.
fn install_manual_time(app: &mut App) {
    app.insert_resource(TimeUpdateStrategy::ManualDuration(
        std::time::Duration::from_millis(100),
    ));
    // The first manual-duration update primes the fixed-time accumulator
    // without yet running a `FixedUpdate`; run it now so that each later
    // `tick()`/`act()` advances the simulation by exactly one fixed step.
    app.update();
}

impl TestFacility {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Create an **empty** facility: no batches, no lots. Demo seeding is
    /// suppressed via the `SkipDemoSeed` marker.
    pub fn new() -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        // Insert the marker BEFORE SimulationPlugin so init_demo skips.
        app.insert_resource(SkipDemoSeed);
        app.add_plugins(SimulationPlugin);
        // Run one update so Startup systems execute.
        app.update();
        // Drive virtual time deterministically from here on: each `update()`
        // advances the clock by exactly the fixed step so `FixedUpdate` runs.
        install_manual_time(&mut app);
        Self { app }
    }

    /// Create a facility with the full seeded demo.
    pub fn with_demo(seed: u64) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        // Pre-insert the RNG so init_demo draws from this seed.
        app.insert_resource(SimRng::from_seed_u64(seed));
        app.add_plugins(SimulationPlugin);
        app.update();
        install_manual_time(&mut app);
        Self { app }
    }

    // -----------------------------------------------------------------------
    // World setup (builder pattern)
    // -----------------------------------------------------------------------

    /// Push a batch onto the ledger.
    pub fn with_batch(mut self, batch: Batch) -> Self {
        self.app
            .world_mut()
            .resource_mut::<BatchLedger>()
            .push(batch);
        self
    }

    /// A batch with canonical measurements, collected `age_minutes` before
    /// the current facility time.
    pub fn sample_batch(&self, id: &str, status: BatchStatus, age_minutes: i64) -> Batch {
        let now = self.clock().now();
        Batch {
            id: id.to_string(),
            truck_id: format!("Car {}", id.trim_start_matches("BATCH-00")),
            zone: "Ward 7 - Kothrud".to_string(),
            collected_at: now - Duration::minutes(age_minutes),
            status,
            total_waste_kg: 245.8,
            segregation_score: 87,
            co2_saved_kg: 32.4,
            composition: Composition {
                plastic: 35.0,
                paper: 28.0,
                organic: 25.0,
                metal: 12.0,
            },
            societies: Vec::new(),
            revenue: None,
        }
    }

    // -----------------------------------------------------------------------
    // Simulation
    // -----------------------------------------------------------------------

    /// Run N fixed-update ticks.
    ///
    /// The simulation runs at 10 Hz (100 ms per tick). The manual time update
    /// strategy advances virtual time by 100 ms on each `app.update()`, which
    /// triggers the `FixedUpdate` schedule exactly once at 1x speed.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.update();
        }
    }

    /// Queue an action, run one tick so the executor processes it, and
    /// return its logged result.
    pub fn act(&mut self, action: OperatorAction) -> ActionResult {
        let tick = self.app.world().resource::<TickCounter>().0;
        self.app.world_mut().resource_mut::<ActionQueue>().push(
            tick,
            ActionSource::Console,
            action,
        );
        self.tick(1);
        self.app
            .world()
            .resource::<ActionResultLog>()
            .last_n(1)
            .first()
            .map(|(_, result)| result.clone())
            .unwrap_or(ActionResult::Success)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn ledger(&self) -> &BatchLedger {
        self.app.world().resource::<BatchLedger>()
    }

    pub fn board(&self) -> &ListingBoard {
        self.app.world().resource::<ListingBoard>()
    }

    pub fn clock(&self) -> &FacilityClock {
        self.app.world().resource::<FacilityClock>()
    }

    pub fn alerts(&self) -> &AlertBoard {
        self.app.world().resource::<AlertBoard>()
    }

    pub fn stats(&self) -> &FacilityStatsBoard {
        self.app.world().resource::<FacilityStatsBoard>()
    }

    /// Clone of the latest observation snapshot.
    pub fn observe(&self) -> FacilitySnapshot {
        self.app
            .world()
            .resource::<CurrentObservation>()
            .observation
            .clone()
    }
}
