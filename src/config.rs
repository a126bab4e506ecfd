use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use crate::dashboard::Dashboard;
use crate::error::Result;
use crate::filter::{FilterSelection, PriceRange, Selector};

pub const DEFAULT_DATA_PATH: &'static str = "airbnb.csv";
pub const DEFAULT_DATA_URL: &'static str = "https://drive.google.com/uc?id=1JmyAQI3bBnLnPe_-dIJyAmHxxc9H2K5u";
pub const DEFAULT_COUNTRY: &'static str = "United States";

#[derive(Debug, Parser)]
#[command(author, version, about = "Explore New York City Airbnb listings", long_about = None)]
pub struct Cli {
    /// Local CSV dataset.
    #[arg(long, default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Where to download the dataset from when it is missing.
    #[arg(long, default_value = DEFAULT_DATA_URL)]
    pub url: String,

    #[arg(long, default_value = DEFAULT_COUNTRY)]
    pub country: String,

    #[arg(short, long, default_value = "all")]
    pub borough: Selector,

    #[arg(short, long, default_value = "all")]
    pub room_type: Selector,

    #[arg(long)]
    pub min_price: Option<f64>,

    #[arg(long)]
    pub max_price: Option<f64>,

    /// Print one update as JSON and exit.
    #[arg(long)]
    pub json: bool,

    #[arg(long, default_value = "warn")]
    pub log_level: LevelFilter,
}

impl Cli {
    /// The starting selection; unset price bounds fall back to the dataset's
    /// price domain.
    pub fn selection(&self, dashboard: &Dashboard) -> Result<FilterSelection> {
        let domain = dashboard.dataset().price_domain();
        Ok(FilterSelection {
            borough: self.borough.clone(),
            price_range: PriceRange::new(
                self.min_price.unwrap_or(domain.low()),
                self.max_price.unwrap_or(domain.high()),
            )?,
            room_type: self.room_type.clone(),
        })
    }
}
