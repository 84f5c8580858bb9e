//! BinTDT facility simulation.
//!
//! All engine state lives in ECS resources (the batch ledger, the listing
//! board, pending deferred operations, derived boards) and is mutated only by
//! the systems registered here, in a fixed `PreSim -> Simulation -> PostSim`
//! order each tick. The computations themselves are pure functions over the
//! domain types, so they are unit-testable without an `App`.

use bevy::prelude::*;

pub mod alerts;
pub mod batches;
pub mod chart_data;
pub mod clock;
pub mod config;
pub mod console_protocol;
pub mod deferred;
pub mod demo_seed;
pub mod facility_actions;
pub mod marketplace;
pub mod observation;
pub mod observation_builder;
pub mod reports;
pub mod rewards;
pub mod sim_rng;
pub mod simulation_sets;
pub mod stats;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
pub mod test_harness;

pub use simulation_sets::SimulationSet;

/// Global tick counter incremented each FixedUpdate, used to stamp queued
/// actions and the observation snapshot.
#[derive(Resource, Default)]
pub struct TickCounter(pub u64);

pub fn tick_counter(mut tick: ResMut<TickCounter>) {
    tick.0 = tick.0.wrapping_add(1);
}

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            FixedUpdate,
            (
                SimulationSet::PreSim,
                SimulationSet::Simulation,
                SimulationSet::PostSim,
            )
                .chain(),
        );

        app.init_resource::<TickCounter>()
            .init_resource::<sim_rng::SimRng>()
            .init_resource::<clock::FacilityClock>()
            .init_resource::<batches::BatchLedger>()
            .init_resource::<marketplace::ListingBoard>()
            .init_resource::<deferred::PendingOps>()
            .init_resource::<deferred::SampleAnalysis>()
            .init_resource::<stats::FacilityStatsBoard>()
            .init_resource::<alerts::AlertBoard>()
            .init_resource::<observation_builder::CurrentObservation>();

        app.add_event::<deferred::OpCompleted>();

        // Action queue, executor, and result log.
        app.add_plugins(facility_actions::FacilityActionsPlugin);

        app.add_systems(Startup, demo_seed::init_demo);

        app.add_systems(
            FixedUpdate,
            (tick_counter, clock::tick_facility_clock).in_set(SimulationSet::PreSim),
        );
        app.add_systems(
            FixedUpdate,
            (deferred::tick_pending_ops, deferred::apply_completed_ops)
                .chain()
                .in_set(SimulationSet::Simulation),
        );
        app.add_systems(
            FixedUpdate,
            (
                stats::update_stats,
                alerts::update_alerts,
                observation_builder::build_observation,
            )
                .chain()
                .in_set(SimulationSet::PostSim),
        );

        app.add_systems(Update, clock::sync_fixed_timestep);
    }
}
