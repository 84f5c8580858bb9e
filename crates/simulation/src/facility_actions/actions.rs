use serde::{Deserialize, Serialize};

/// Every state change an operator (or buyer, via the console) can request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OperatorAction {
    /// Rebuild the demo facility from a seed.
    NewDemo { seed: u64 },
    SetPaused { paused: bool },
    SetSpeed { speed: f32 },
    /// Advance a batch one lifecycle stage.
    AdvanceBatch { batch_id: String },
    /// Run the (simulated) supervisor verification on a processing batch.
    VerifyBatch { batch_id: String },
    /// List a verified batch's dominant material to the marketplace.
    ListBatchToMarket { batch_id: String },
    /// Run the (simulated) vision model on an uploaded waste sample.
    AnalyzeSample,
    ReserveListing {
        listing_id: String,
        buyer: Option<String>,
    },
    PurchaseListing {
        listing_id: String,
        buyer: Option<String>,
    },
    /// Quote requests reserve the lot without naming a buyer.
    RequestQuote { listing_id: String },
}

impl OperatorAction {
    /// Compact human-readable form for logs and snapshots.
    pub fn summary(&self) -> String {
        match self {
            OperatorAction::NewDemo { seed } => format!("New demo (seed {seed})"),
            OperatorAction::SetPaused { paused } => format!("Set paused = {paused}"),
            OperatorAction::SetSpeed { speed } => format!("Set speed = {speed}x"),
            OperatorAction::AdvanceBatch { batch_id } => format!("Advance {batch_id}"),
            OperatorAction::VerifyBatch { batch_id } => format!("Verify {batch_id}"),
            OperatorAction::ListBatchToMarket { batch_id } => {
                format!("List {batch_id} to marketplace")
            }
            OperatorAction::AnalyzeSample => "Analyze waste sample".to_string(),
            OperatorAction::ReserveListing { listing_id, .. } => format!("Reserve {listing_id}"),
            OperatorAction::PurchaseListing { listing_id, .. } => format!("Purchase {listing_id}"),
            OperatorAction::RequestQuote { listing_id } => format!("Request quote on {listing_id}"),
        }
    }
}
