use crate::batches::Batch;

use super::types::{Listing, ListingBoard, ListingStatus};

/// Why a batch could not be promoted to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionError {
    /// The batch has not reached a market-eligible lifecycle stage.
    NotEligible,
    /// A lot for this (batch, material) pair already exists; promotion is a
    /// no-op rather than a duplicate.
    AlreadyListed,
}

/// Derive a new lot from a batch and place it on the board.
///
/// The lot covers the batch's dominant composition channel at that material's
/// book price; its quantity is the batch mass scaled by the channel share.
/// Returns the new listing id.
pub fn promote_batch(board: &mut ListingBoard, batch: &Batch) -> Result<String, PromotionError> {
    if !batch.status.market_eligible() {
        return Err(PromotionError::NotEligible);
    }

    let material = batch.composition.dominant_material();
    if board.has_listing_for(&batch.id, material) {
        return Err(PromotionError::AlreadyListed);
    }

    let quantity_kg = batch.total_waste_kg * batch.composition.share(material) / 100.0;
    let id = board.allocate_id();
    board.push(Listing {
        id: id.clone(),
        batch_id: batch.id.clone(),
        truck_id: batch.truck_id.clone(),
        material,
        quantity_kg,
        price_per_kg: material.unit_price(),
        status: ListingStatus::Available,
        buyer: None,
        co2_saved_kg: batch.co2_saved_kg,
    });
    Ok(id)
}
