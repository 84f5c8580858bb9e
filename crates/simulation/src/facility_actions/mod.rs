//! Operator actions: the only mutation path into facility state.
//!
//! Console commands and scripted scenarios push [`OperatorAction`]s onto the
//! queue; the executor drains it at the start of each tick, applies each
//! action against the resources, and records the outcome in a ring-buffer
//! log the observation snapshot exposes.

pub mod actions;
pub mod executor;
pub mod plugin;
pub mod queue;
pub mod result_log;
pub mod results;

pub use actions::OperatorAction;
pub use executor::execute_queued_actions;
pub use plugin::FacilityActionsPlugin;
pub use queue::{ActionQueue, ActionSource, QueuedAction};
pub use result_log::ActionResultLog;
pub use results::{ActionError, ActionResult};
