use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::OperatorAction;

/// Where a queued action came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionSource {
    /// Facility staff via the operator surfaces.
    Operator,
    /// A buyer acting on a marketplace lot.
    Buyer,
    /// The headless console session.
    Console,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueuedAction {
    pub tick: u64,
    pub source: ActionSource,
    pub action: OperatorAction,
}

/// FIFO queue of actions awaiting execution at the next tick.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionQueue {
    pending: Vec<QueuedAction>,
}

impl ActionQueue {
    pub fn push(&mut self, tick: u64, source: ActionSource, action: OperatorAction) {
        self.pending.push(QueuedAction {
            tick,
            source,
            action,
        });
    }

    pub fn drain(&mut self) -> Vec<QueuedAction> {
        self.pending.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}
