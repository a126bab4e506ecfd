use std::fs::File;
use std::io;
use std::path::Path;

use csv::StringRecord;
use log::{debug, info};
use serde::Deserialize;

use crate::dataset::{Dataset, Listing};
use crate::error::{ExplorerError, Result};

const RENAMED_COLUMNS: &'static [(&'static str, &'static str)] = &[("neighbourhood group", "borough")];
const REQUIRED_COLUMNS: &'static [&'static str] = &["country", "borough", "price"];
const MISSPELLED_BOROUGHS: &'static [(&'static str, &'static str)] =
    &[("brookln", "Brooklyn"), ("manhatan", "Manhattan")];

/// A row as it sits in the file, keyed by normalized column name. Columns
/// not named here (`id`, `country_code`, `license`, ...) are ignored.
#[derive(Debug, Deserialize)]
struct RawListing {
    country: Option<String>,
    borough: Option<String>,
    name: Option<String>,
    host_id: Option<String>,
    host_identity_verified: Option<String>,
    host_name: Option<String>,
    neighbourhood: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    lat: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    long: Option<f64>,
    room_type: Option<String>,
    price: Option<String>,
    service_fee: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    minimum_nights: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    number_of_reviews: Option<f64>,
    cancellation_policy: Option<String>,
}

pub fn read_data(path: &Path, country: &str) -> Result<Dataset> {
    let file = File::open(path)?;
    let listings = read_listings(file, country)?;
    info!("loaded {} listings from {}", listings.len(), path.display());
    Dataset::from_listings(listings)
}

/// Reads and cleans every row of `reader` that belongs to `country`.
pub fn read_listings<R: io::Read>(reader: R, country: &str) -> Result<Vec<Listing>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = normalize_headers(rdr.headers()?);
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == *column) {
            return Err(ExplorerError::MissingColumn(*column));
        }
    }

    let mut read = 0usize;
    let mut in_country = 0usize;
    let mut listings = Vec::<Listing>::new();
    for (index, result) in rdr.records().enumerate() {
        let record = result?;
        read += 1;
        let raw: RawListing = record.deserialize(Some(&headers))?;
        if raw.country.as_deref() != Some(country) {
            continue;
        }
        in_country += 1;
        if let Some(listing) = clean(index + 1, raw)? {
            listings.push(listing);
        }
    }

    if in_country == 0 {
        return Err(ExplorerError::CountryAbsent(country.to_string()));
    }
    info!(
        "read {} rows, {} in {}, dropped {} missing borough or price",
        read,
        in_country,
        country,
        in_country - listings.len()
    );
    Ok(listings)
}

/// Lowercases column names, joins words with underscores and applies the
/// column renames.
pub fn normalize_headers(headers: &StringRecord) -> StringRecord {
    headers
        .iter()
        .map(|h| {
            let h = h.trim().to_lowercase();
            let h = RENAMED_COLUMNS
                .iter()
                .find(|(from, _)| *from == h)
                .map_or(h.clone(), |(_, to)| to.to_string());
            h.replace(' ', "_")
        })
        .collect()
}

pub fn correct_borough(borough: &str) -> &str {
    MISSPELLED_BOROUGHS
        .iter()
        .find(|(wrong, _)| *wrong == borough)
        .map_or(borough, |(_, right)| *right)
}

/// Strips `$`, thousands separators and whitespace, then parses the amount
/// rounded to cents. Blank input is a missing value.
pub fn parse_currency(row: usize, text: &str) -> Result<Option<f64>> {
    let stripped: String = text
        .chars()
        .filter(|c| *c != '$' && *c != ',' && !c.is_whitespace())
        .collect();
    if stripped.is_empty() {
        return Ok(None);
    }
    match stripped.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount >= 0.0 => Ok(Some((amount * 100.0).round() / 100.0)),
        _ => Err(ExplorerError::InvalidCurrency {
            row,
            value: text.to_string(),
        }),
    }
}

fn clean(row: usize, raw: RawListing) -> Result<Option<Listing>> {
    let price = match raw.price.as_deref() {
        Some(text) => parse_currency(row, text)?,
        None => None,
    };
    let service_fee = match raw.service_fee.as_deref() {
        Some(text) => parse_currency(row, text)?,
        None => None,
    };
    let (borough, price) = match (raw.borough, price) {
        (Some(borough), Some(price)) => (correct_borough(&borough).to_string(), price),
        _ => {
            debug!("row {}: dropped, missing borough or price", row);
            return Ok(None);
        }
    };

    Ok(Some(Listing {
        id: row,
        name: raw.name,
        host_id: raw.host_id,
        host_identity_verified: raw.host_identity_verified,
        host_name: raw.host_name,
        borough,
        neighbourhood: raw.neighbourhood,
        lat: raw.lat,
        long: raw.long,
        room_type: raw.room_type,
        price,
        service_fee,
        minimum_nights: raw.minimum_nights.map(|n| n as i64),
        number_of_reviews: raw.number_of_reviews.filter(|n| *n >= 0.0).map(|n| n as u64),
        cancellation_policy: raw.cancellation_policy,
    }))
}
