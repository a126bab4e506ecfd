use serde::Serialize;

use crate::error::{ExplorerError, Result};
use crate::filter::PriceRange;

/// One rentable unit, cleaned. `borough` and `price` are always present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    /// 1-based data row of the listing in the source file, header excluded.
    pub id: usize,
    pub name: Option<String>,
    pub host_id: Option<String>,
    pub host_identity_verified: Option<String>,
    pub host_name: Option<String>,
    pub borough: String,
    pub neighbourhood: Option<String>,
    pub lat: Option<f64>,
    pub long: Option<f64>,
    pub room_type: Option<String>,
    pub price: f64,
    pub service_fee: Option<f64>,
    pub minimum_nights: Option<i64>,
    pub number_of_reviews: Option<u64>,
    pub cancellation_policy: Option<String>,
}

/// The cleaned listing collection plus the facts the selectors need.
/// Immutable once built.
#[derive(Debug)]
pub struct Dataset {
    listings: Vec<Listing>,
    room_types: Vec<String>,
    price_domain: PriceRange,
}

impl Dataset {
    pub fn from_listings(listings: Vec<Listing>) -> Result<Self> {
        if listings.is_empty() {
            return Err(ExplorerError::EmptyDataset);
        }

        let mut room_types = Vec::<String>::new();
        for room_type in listings.iter().filter_map(|l| l.room_type.as_ref()) {
            if !room_types.contains(room_type) {
                room_types.push(room_type.clone());
            }
        }

        let low = listings.iter().map(|l| l.price).fold(f64::INFINITY, f64::min);
        let high = listings.iter().map(|l| l.price).fold(f64::NEG_INFINITY, f64::max);

        Ok(Dataset {
            listings,
            room_types,
            price_domain: PriceRange::new(low, high)?,
        })
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    /// Distinct room types in discovery order.
    pub fn room_types(&self) -> &[String] {
        &self.room_types
    }

    /// `[min(price), max(price)]` over all listings.
    pub fn price_domain(&self) -> PriceRange {
        self.price_domain
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}
