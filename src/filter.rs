use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::dataset::Listing;
use crate::error::{ExplorerError, Result};
use crate::partition::PartitionIndex;

const ALL: &'static str = "all";

/// A dropdown value: everything, or one known value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Selector {
    All,
    Only(String),
}

impl FromStr for Selector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case(ALL) {
            Ok(Selector::All)
        } else {
            Ok(Selector::Only(s.to_string()))
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Selector::All => write!(f, "All"),
            Selector::Only(value) => write!(f, "{}", value),
        }
    }
}

/// Inclusive `[low, high]` price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceRange {
    low: f64,
    high: f64,
}

impl PriceRange {
    pub fn new(low: f64, high: f64) -> Result<Self> {
        if !low.is_finite() || !high.is_finite() || low > high {
            return Err(ExplorerError::InvalidPriceRange { low, high });
        }
        Ok(PriceRange { low, high })
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.low && price <= self.high
    }

    /// The slider caption, e.g. `Min: 50 Max: 1200`.
    pub fn label(&self) -> String {
        format!("Min: {} Max: {}", self.low, self.high)
    }
}

/// The user's current choices; created per interaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterSelection {
    pub borough: Selector,
    pub price_range: PriceRange,
    pub room_type: Selector,
}

/// Rows of the chosen borough (or all rows) priced within the range and,
/// when one is chosen, of the given room type. An empty result is valid.
pub fn filter<'a>(index: &PartitionIndex<'a>, selection: &FilterSelection) -> Result<Vec<&'a Listing>> {
    let base: Vec<&'a Listing> = match &selection.borough {
        Selector::All => index.dataset().listings().iter().collect(),
        Selector::Only(borough) => index
            .subset(borough)
            .ok_or_else(|| ExplorerError::UnknownBorough(borough.clone()))?
            .to_vec(),
    };

    if let Selector::Only(room_type) = &selection.room_type {
        if !index.dataset().room_types().contains(room_type) {
            return Err(ExplorerError::UnknownRoomType(room_type.clone()));
        }
    }

    Ok(base
        .into_iter()
        .filter(|l| selection.price_range.contains(l.price))
        .filter(|l| match &selection.room_type {
            Selector::All => true,
            Selector::Only(room_type) => l.room_type.as_ref() == Some(room_type),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::dataset::Dataset;
    use crate::test_support::{random_dataset, sample_dataset};

    fn select(borough: &str, low: f64, high: f64, room_type: &str) -> FilterSelection {
        FilterSelection {
            borough: borough.parse().unwrap(),
            price_range: PriceRange::new(low, high).unwrap(),
            room_type: room_type.parse().unwrap(),
        }
    }

    fn ids(listings: &[&Listing]) -> Vec<usize> {
        listings.iter().map(|l| l.id).collect()
    }

    #[test]
    fn parses_selectors() {
        assert_eq!("All".parse::<Selector>().unwrap(), Selector::All);
        assert_eq!("all".parse::<Selector>().unwrap(), Selector::All);
        assert_eq!(
            "Queens".parse::<Selector>().unwrap(),
            Selector::Only("Queens".to_string())
        );
        assert_eq!(Selector::All.to_string(), "All");
    }

    #[test]
    fn rejects_inverted_or_non_finite_ranges() {
        assert!(PriceRange::new(10.0, 5.0).is_err());
        assert!(PriceRange::new(f64::NAN, 5.0).is_err());
        assert!(PriceRange::new(5.0, f64::INFINITY).is_err());
        assert!(PriceRange::new(5.0, 5.0).is_ok());
    }

    #[test]
    fn formats_price_label() {
        assert_eq!(PriceRange::new(50.0, 1200.0).unwrap().label(), "Min: 50 Max: 1200");
        assert_eq!(PriceRange::new(50.5, 99.99).unwrap().label(), "Min: 50.5 Max: 99.99");
    }

    #[test]
    fn full_selection_returns_everything() {
        let dataset = sample_dataset();
        let index = PartitionIndex::build(&dataset).unwrap();
        let domain = dataset.price_domain();

        let subset = filter(&index, &select("all", domain.low(), domain.high(), "all")).unwrap();

        assert_eq!(subset.len(), dataset.len());
        assert_eq!(ids(&subset), dataset.listings().iter().map(|l| l.id).collect::<Vec<_>>());
    }

    #[test]
    fn restricts_by_borough_price_and_room_type() {
        let dataset = sample_dataset();
        let index = PartitionIndex::build(&dataset).unwrap();

        let manhattan = filter(&index, &select("Manhattan", 50.0, 1200.0, "all")).unwrap();
        assert_eq!(ids(&manhattan), vec![2, 4, 9]);
        assert!(manhattan.iter().all(|l| l.borough == "Manhattan"));

        let cheap = filter(&index, &select("all", 50.0, 368.0, "all")).unwrap();
        assert_eq!(ids(&cheap), vec![2, 4, 7]);

        let private = filter(&index, &select("all", 50.0, 1200.0, "Private room")).unwrap();
        assert_eq!(ids(&private), vec![1, 3, 9]);

        let none = filter(&index, &select("Queens", 51.0, 1200.0, "all")).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn unknown_selector_values_are_errors() {
        let dataset = sample_dataset();
        let index = PartitionIndex::build(&dataset).unwrap();

        let err = filter(&index, &select("Bronx", 50.0, 1200.0, "all")).unwrap_err();
        assert!(matches!(err, ExplorerError::UnknownBorough(b) if b == "Bronx"));
        let err = filter(&index, &select("all", 50.0, 1200.0, "Hotel room")).unwrap_err();
        assert!(matches!(err, ExplorerError::UnknownRoomType(r) if r == "Hotel room"));
    }

    #[test]
    fn narrowing_the_range_never_grows_the_subset() {
        let dataset: Dataset = random_dataset(7, 400);
        let index = PartitionIndex::build(&dataset).unwrap();
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..50 {
            let low = rng.gen_range(10.0..500.0);
            let high = rng.gen_range(low..1010.0);
            let inner_low = rng.gen_range(low..=high);
            let inner_high = rng.gen_range(inner_low..=high);
            for borough in ["all", "Manhattan", "Brooklyn", "Queens"] {
                let outer = filter(&index, &select(borough, low, high, "all")).unwrap();
                let inner = filter(&index, &select(borough, inner_low, inner_high, "all")).unwrap();
                assert!(inner.len() <= outer.len());
            }
        }
    }

    #[test]
    fn does_not_touch_the_shared_collection() {
        let dataset = random_dataset(3, 50);
        let index = PartitionIndex::build(&dataset).unwrap();
        let before = dataset.listings().to_vec();

        let _ = filter(&index, &select("Brooklyn", 100.0, 200.0, "Private room")).unwrap();

        assert_eq!(dataset.listings(), before.as_slice());
    }
}
