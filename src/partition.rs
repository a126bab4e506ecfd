use std::collections::HashMap;

use log::debug;

use crate::dataset::{Dataset, Listing};
use crate::error::{ExplorerError, Result};

/// Qualitative borough colors, handed out in discovery order.
pub const PALETTE: [&'static str; 5] = ["#ff7f00", "#984ea3", "#4daf4a", "#377eb8", "#e41a1c"];

/// Borough lookups built once after load: the rows of each borough and the
/// color that identifies it on every view.
#[derive(Debug)]
pub struct PartitionIndex<'a> {
    dataset: &'a Dataset,
    boroughs: Vec<&'a str>,
    subsets: HashMap<&'a str, Vec<&'a Listing>>,
    colors: HashMap<&'a str, &'static str>,
}

impl<'a> PartitionIndex<'a> {
    pub fn build(dataset: &'a Dataset) -> Result<Self> {
        let mut boroughs = Vec::<&'a str>::new();
        let mut subsets = HashMap::<&'a str, Vec<&'a Listing>>::new();
        for listing in dataset.listings() {
            let borough = listing.borough.as_str();
            subsets
                .entry(borough)
                .or_insert_with(|| {
                    boroughs.push(borough);
                    Vec::new()
                })
                .push(listing);
        }

        if boroughs.len() > PALETTE.len() {
            return Err(ExplorerError::PaletteExhausted {
                boroughs: boroughs.len(),
                palette: PALETTE.len(),
            });
        }
        let colors: HashMap<&'a str, &'static str> =
            boroughs.iter().zip(PALETTE.iter()).map(|(b, c)| (*b, *c)).collect();
        for borough in &boroughs {
            debug!("borough {} has {} listings, color {}", borough, subsets[borough].len(), colors[borough]);
        }

        Ok(PartitionIndex {
            dataset,
            boroughs,
            subsets,
            colors,
        })
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Distinct boroughs in discovery order.
    pub fn boroughs(&self) -> &[&'a str] {
        &self.boroughs
    }

    pub fn subset(&self, borough: &str) -> Option<&[&'a Listing]> {
        self.subsets.get(borough).map(|s| s.as_slice())
    }

    pub fn color(&self, borough: &str) -> Option<&'static str> {
        self.colors.get(borough).copied()
    }
}
