use serde::Serialize;

use crate::dataset::Listing;
use crate::partition::PartitionIndex;

/// A map marker. Coordinates are absent when the source row had none;
/// renderers skip such points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint<'a> {
    pub id: usize,
    pub lat: Option<f64>,
    pub long: Option<f64>,
    pub name: Option<&'a str>,
    pub borough: &'a str,
    pub color: &'static str,
    pub price: f64,
    pub room_type: Option<&'a str>,
    pub number_of_reviews: Option<u64>,
}

impl<'a> MapPoint<'a> {
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.long?, self.lat?))
    }

    pub fn hover_text(&self) -> String {
        format!(
            "{}\nPrice: ${:.2}\nRoom Type: {}\nNumber of Reviews: {}",
            self.name.unwrap_or_default(),
            self.price,
            self.room_type.unwrap_or_default(),
            self.number_of_reviews.map_or(String::from("-"), |n| n.to_string())
        )
    }
}

/// One point per row, in subset order, colored by borough.
pub fn project_map<'a>(subset: &[&'a Listing], index: &PartitionIndex) -> Vec<MapPoint<'a>> {
    subset
        .iter()
        .map(|l| MapPoint {
            id: l.id,
            lat: l.lat,
            long: l.long,
            name: l.name.as_deref(),
            borough: &l.borough,
            color: index.color(&l.borough).unwrap_or_default(),
            price: l.price,
            room_type: l.room_type.as_deref(),
            number_of_reviews: l.number_of_reviews,
        })
        .collect()
}
