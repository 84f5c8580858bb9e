//! Deterministic simulation ordering via `SystemSet` phases.
//!
//! Every system in `FixedUpdate` belongs to one of these sets, configured as
//! a chain so inter-plugin ordering is explicit rather than an implicit
//! timing assumption.
//!
//! ```text
//! PreSim  →  Simulation  →  PostSim
//! ```
//!
//! * **PreSim** – tick counters, the facility clock, and operator action
//!   execution. These set up the per-tick state the engine reads.
//! * **Simulation** – deferred-operation countdowns and their completions
//!   (marketplace promotion, segregation verification, sample analysis).
//! * **PostSim** – aggregation and reporting: facility stats, alerts, and
//!   the observation snapshot. These only read simulation state, so the
//!   console can safely consume their output after the tick.

use bevy::prelude::*;

/// Ordered phases for systems running in the `FixedUpdate` schedule.
///
/// Individual modules use `.in_set(SimulationSet::X)` when registering their
/// systems, retaining the ability to add fine-grained `.after()` constraints
/// within a phase.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Pre-simulation setup: tick counter, facility clock, action executor.
    PreSim,
    /// Core engine work: pending-operation countdowns and completions.
    Simulation,
    /// Post-simulation aggregation: stats, alerts, observation snapshot.
    PostSim,
}
