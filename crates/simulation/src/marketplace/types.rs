use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// =============================================================================
// Materials and the price book
// =============================================================================

/// Book price per kg for plastic lots (currency units).
pub(crate) const BOOK_PRICE_PLASTIC: f64 = 18.0;
/// Book price per kg for paper lots.
pub(crate) const BOOK_PRICE_PAPER: f64 = 12.0;
/// Book price per kg for organic/compost-grade lots.
pub(crate) const BOOK_PRICE_ORGANIC: f64 = 8.0;
/// Book price per kg for metal lots.
pub(crate) const BOOK_PRICE_METAL: f64 = 25.0;

/// Recyclable material category of a marketplace lot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Material {
    Plastic,
    Paper,
    Organic,
    Metal,
}

impl Material {
    /// All materials, in composition-channel order. This order also breaks
    /// ties when picking a batch's dominant material.
    pub const ALL: [Material; 4] = [
        Material::Plastic,
        Material::Paper,
        Material::Organic,
        Material::Metal,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Material::Plastic => "Plastic",
            Material::Paper => "Paper",
            Material::Organic => "Organic",
            Material::Metal => "Metal",
        }
    }

    /// Fixed listing price per kg for this material.
    pub fn unit_price(self) -> f64 {
        match self {
            Material::Plastic => BOOK_PRICE_PLASTIC,
            Material::Paper => BOOK_PRICE_PAPER,
            Material::Organic => BOOK_PRICE_ORGANIC,
            Material::Metal => BOOK_PRICE_METAL,
        }
    }
}

// =============================================================================
// Listings
// =============================================================================

/// Sale status of a lot. Transitions are monotonic: a reserved lot never
/// returns to available, a sold lot is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListingStatus {
    Available,
    Reserved,
    Sold,
}

/// A marketplace offer for a quantity of one material derived from a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub batch_id: String,
    pub truck_id: String,
    pub material: Material,
    pub quantity_kg: f64,
    pub price_per_kg: f64,
    pub status: ListingStatus,
    pub buyer: Option<String>,
    pub co2_saved_kg: f64,
}

impl Listing {
    /// Estimated lot value at the listed unit price.
    pub fn lot_value(&self) -> f64 {
        self.quantity_kg * self.price_per_kg
    }

    /// Available -> Reserved. Records the buyer when one is named.
    /// Returns false (state unchanged) for any other starting status.
    pub fn reserve(&mut self, buyer: Option<String>) -> bool {
        if self.status != ListingStatus::Available {
            return false;
        }
        self.status = ListingStatus::Reserved;
        if buyer.is_some() {
            self.buyer = buyer;
        }
        true
    }

    /// Available/Reserved -> Sold. Returns false once already sold.
    pub fn sell(&mut self, buyer: Option<String>) -> bool {
        if self.status == ListingStatus::Sold {
            return false;
        }
        self.status = ListingStatus::Sold;
        if buyer.is_some() {
            self.buyer = buyer;
        }
        true
    }
}

// =============================================================================
// Board resource
// =============================================================================

/// All marketplace listings, plus the id sequence for new lots.
///
/// Ids are allocated from a monotonic sequence (`LST-101`, `LST-102`, ...)
/// so a freshly generated id can never collide with an existing lot.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct ListingBoard {
    pub listings: Vec<Listing>,
    next_seq: u32,
}

impl Default for ListingBoard {
    fn default() -> Self {
        Self {
            listings: Vec::new(),
            next_seq: 101,
        }
    }
}

impl ListingBoard {
    pub fn get(&self, id: &str) -> Option<&Listing> {
        self.listings.iter().find(|l| l.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Listing> {
        self.listings.iter_mut().find(|l| l.id == id)
    }

    /// Whether a lot already exists for this (batch, material) pair.
    pub fn has_listing_for(&self, batch_id: &str, material: Material) -> bool {
        self.listings
            .iter()
            .any(|l| l.batch_id == batch_id && l.material == material)
    }

    pub fn allocate_id(&mut self) -> String {
        let id = format!("LST-{}", self.next_seq);
        self.next_seq += 1;
        id
    }

    pub fn push(&mut self, listing: Listing) {
        self.listings.push(listing);
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

// =============================================================================
// Board statistics
// =============================================================================

/// Marketplace summary strip: open lots, realized revenue, CO2 footprint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketplaceStats {
    /// Lots currently available to buyers.
    pub active_lots: u32,
    /// Revenue from closed (sold) lots at their listed prices.
    pub sold_revenue: f64,
    /// CO2 saved across all listed lots, regardless of status.
    pub total_co2_saved_kg: f64,
}

pub fn board_stats(listings: &[Listing]) -> MarketplaceStats {
    let active_lots = listings
        .iter()
        .filter(|l| l.status == ListingStatus::Available)
        .count() as u32;
    let sold_revenue = listings
        .iter()
        .filter(|l| l.status == ListingStatus::Sold)
        .map(Listing::lot_value)
        .sum();
    let total_co2_saved_kg = listings.iter().map(|l| l.co2_saved_kg).sum();
    MarketplaceStats {
        active_lots,
        sold_revenue,
        total_co2_saved_kg,
    }
}
