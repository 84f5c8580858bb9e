//! Collection batches and their processing lifecycle.
//!
//! A batch is one truck-load of collected waste tracked through the MRF:
//! `Collected → Processing → Verified → ReadyForSale → Sold`. The ledger
//! resource is the single source of truth for batch state; all mutation goes
//! through the action executor.

mod types;


pub use types::{Batch, BatchLedger, BatchStatus, Composition, SocietyContribution};
