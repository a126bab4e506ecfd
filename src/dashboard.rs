use log::debug;
use serde::Serialize;

use crate::aggregate::{aggregate, BucketStat};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::filter::{filter, FilterSelection, Selector};
use crate::map::{project_map, MapPoint};
use crate::partition::PartitionIndex;
use crate::table::{project_table, Table};

/// Everything the views need after one filter change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewUpdate<'a> {
    pub selection: FilterSelection,
    pub price_label: String,
    pub map_points: Vec<MapPoint<'a>>,
    pub bar_series: Vec<BucketStat<'a>>,
    pub table: Table,
}

/// Read-only state shared by every request.
#[derive(Debug)]
pub struct Dashboard<'a> {
    index: PartitionIndex<'a>,
}

impl<'a> Dashboard<'a> {
    pub fn new(dataset: &'a Dataset) -> Result<Self> {
        Ok(Dashboard {
            index: PartitionIndex::build(dataset)?,
        })
    }

    pub fn index(&self) -> &PartitionIndex<'a> {
        &self.index
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.index.dataset()
    }

    /// Everything selected: all boroughs, all room types, the full price
    /// domain.
    pub fn initial_selection(&self) -> FilterSelection {
        FilterSelection {
            borough: Selector::All,
            price_range: self.dataset().price_domain(),
            room_type: Selector::All,
        }
    }

    /// Filters once and derives the three view products from that subset.
    pub fn update(&self, selection: &FilterSelection) -> Result<ViewUpdate<'a>> {
        let subset = filter(&self.index, selection)?;
        debug!(
            "borough={} room_type={} {}: {} listings",
            selection.borough,
            selection.room_type,
            selection.price_range.label(),
            subset.len()
        );

        Ok(ViewUpdate {
            selection: selection.clone(),
            price_label: selection.price_range.label(),
            map_points: project_map(&subset, &self.index),
            bar_series: aggregate(&subset, &self.index, selection.price_range),
            table: project_table(&subset),
        })
    }
}
