use serde::{Deserialize, Serialize};

use super::types::{Listing, ListingStatus, Material};

// =============================================================================
// Buyer view
// =============================================================================

/// Price ordering for buyer-facing results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceSort {
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

/// Conjunctive buyer-side filter over the board.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuyerQuery {
    /// Restrict to one material, or `None` for any.
    pub material: Option<Material>,
    /// Minimum lot quantity in kg (0 disables the filter).
    pub min_quantity_kg: f64,
    /// Case-insensitive substring matched against batch id and truck id.
    pub search: String,
    pub price_sort: PriceSort,
}

/// Apply a buyer query to the board.
///
/// Only available lots are buyer-eligible; reserved and sold lots stay out of
/// this view (they remain visible to operators). All active criteria must
/// match. Sorting is stable and only reorders by unit price when requested.
pub fn buyer_listings(listings: &[Listing], query: &BuyerQuery) -> Vec<Listing> {
    let term = query.search.trim().to_lowercase();
    let mut result: Vec<Listing> = listings
        .iter()
        .filter(|l| l.status == ListingStatus::Available)
        .filter(|l| query.material.is_none_or(|m| l.material == m))
        .filter(|l| l.quantity_kg >= query.min_quantity_kg)
        .filter(|l| {
            term.is_empty()
                || l.batch_id.to_lowercase().contains(&term)
                || l.truck_id.to_lowercase().contains(&term)
        })
        .cloned()
        .collect();

    match query.price_sort {
        PriceSort::None => {}
        PriceSort::Ascending => {
            result.sort_by(|a, b| a.price_per_kg.total_cmp(&b.price_per_kg));
        }
        PriceSort::Descending => {
            result.sort_by(|a, b| b.price_per_kg.total_cmp(&a.price_per_kg));
        }
    }
    result
}

// =============================================================================
// Operator view
// =============================================================================

/// Operator-side filter: every lot stays visible regardless of status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperatorQuery {
    pub material: Option<Material>,
    pub status: Option<ListingStatus>,
}

pub fn operator_listings(listings: &[Listing], query: &OperatorQuery) -> Vec<Listing> {
    listings
        .iter()
        .filter(|l| query.material.is_none_or(|m| l.material == m))
        .filter(|l| query.status.is_none_or(|s| l.status == s))
        .cloned()
        .collect()
}

// =============================================================================
// Public catalogue
// =============================================================================

/// Sort modes for the public lot catalogue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CatalogueSort {
    /// Most recently created lots first (descending listing id).
    #[default]
    Recent,
    PriceLow,
    PriceHigh,
    Co2High,
}

/// Catalogue search matches a wider field set than the buyer view: listing
/// id, batch id, truck id, material name, and buyer.
pub fn catalogue_listings(
    listings: &[Listing],
    material: Option<Material>,
    search: &str,
    sort: CatalogueSort,
) -> Vec<Listing> {
    let term = search.trim().to_lowercase();
    let mut result: Vec<Listing> = listings
        .iter()
        .filter(|l| material.is_none_or(|m| l.material == m))
        .filter(|l| {
            term.is_empty()
                || l.id.to_lowercase().contains(&term)
                || l.batch_id.to_lowercase().contains(&term)
                || l.truck_id.to_lowercase().contains(&term)
                || l.material.name().to_lowercase().contains(&term)
                || l.buyer
                    .as_deref()
                    .is_some_and(|b| b.to_lowercase().contains(&term))
        })
        .cloned()
        .collect();

    match sort {
        CatalogueSort::Recent => result.sort_by(|a, b| b.id.cmp(&a.id)),
        CatalogueSort::PriceLow => {
            result.sort_by(|a, b| a.price_per_kg.total_cmp(&b.price_per_kg));
        }
        CatalogueSort::PriceHigh => {
            result.sort_by(|a, b| b.price_per_kg.total_cmp(&a.price_per_kg));
        }
        CatalogueSort::Co2High => {
            result.sort_by(|a, b| b.co2_saved_kg.total_cmp(&a.co2_saved_kg));
        }
    }
    result
}
