//! Recyclables marketplace: lots derived from verified batches.
//!
//! Split into sub-modules:
//! - `types`: materials, the price book, listings, the board resource
//! - `promote`: deriving a listing from a batch (idempotent)
//! - `filter`: buyer/operator filtering and price sorting

mod filter;
mod promote;
mod types;


pub use filter::{
    buyer_listings, catalogue_listings, operator_listings, BuyerQuery, CatalogueSort,
    OperatorQuery, PriceSort,
};
pub use promote::{promote_batch, PromotionError};
pub use types::{board_stats, Listing, ListingBoard, ListingStatus, Material, MarketplaceStats};
