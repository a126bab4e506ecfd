use std::cmp::Ordering;

use serde::Serialize;

use crate::dataset::Listing;

pub const COLUMN_COUNT: usize = 10;

/// Displayed fields, in display order.
pub const COLUMNS: [&'static str; COLUMN_COUNT] = [
    "name",
    "host_identity_verified",
    "host_name",
    "borough",
    "neighbourhood",
    "cancellation_policy",
    "room_type",
    "price",
    "service_fee",
    "minimum_nights",
];

const LABEL_OVERRIDES: &'static [(&'static str, &'static str)] = &[
    ("Price", "Price (in US dollar)"),
    ("Service Fee", "Service Fee (in US dollar)"),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(Option<String>),
    Number(Option<f64>),
}

impl Cell {
    /// Missing values order first; cells of different kinds compare equal.
    fn compare(&self, other: &Cell) -> Ordering {
        match (self, other) {
            (Cell::Text(a), Cell::Text(b)) => a.cmp(b),
            (Cell::Number(a), Cell::Number(b)) => match (a, b) {
                (Some(a), Some(b)) => a.total_cmp(b),
                _ => a.is_some().cmp(&b.is_some()),
            },
            _ => Ordering::Equal,
        }
    }

    pub fn display(&self) -> String {
        match self {
            Cell::Text(Some(text)) => text.clone(),
            Cell::Number(Some(number)) => number.to_string(),
            _ => String::new(),
        }
    }
}

pub type Row = [Cell; COLUMN_COUNT];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub column: usize,
    pub descending: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub id: &'static str,
    pub label: String,
}

/// Display rows for the listing table, in subset order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

impl Table {
    /// Stable multi-column sort; earlier keys take precedence. Keys naming
    /// a column past the end are ignored.
    pub fn sort_by(&mut self, keys: &[SortKey]) {
        let keys: Vec<SortKey> = keys.iter().copied().filter(|k| k.column < COLUMN_COUNT).collect();
        self.rows.sort_by(|a, b| {
            keys.iter()
                .map(|k| {
                    let ordering = a[k.column].compare(&b[k.column]);
                    if k.descending {
                        ordering.reverse()
                    } else {
                        ordering
                    }
                })
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal)
        });
    }

    pub fn labels(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.label.as_str()).collect()
    }
}

/// `service_fee` becomes `Service Fee`: underscores to spaces, each word
/// capitalized, then the currency overrides.
pub fn column_label(column: &str) -> String {
    let title = column
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ");
    LABEL_OVERRIDES
        .iter()
        .find(|(from, _)| *from == title)
        .map_or(title.clone(), |(_, to)| to.to_string())
}

fn text(value: &Option<String>) -> Cell {
    Cell::Text(value.clone())
}

pub fn project_table(subset: &[&Listing]) -> Table {
    let columns = COLUMNS
        .iter()
        .map(|&id| Column {
            id,
            label: column_label(id),
        })
        .collect();
    let rows = subset
        .iter()
        .map(|l| {
            [
                text(&l.name),
                text(&l.host_identity_verified),
                text(&l.host_name),
                Cell::Text(Some(l.borough.clone())),
                text(&l.neighbourhood),
                text(&l.cancellation_policy),
                text(&l.room_type),
                Cell::Number(Some(l.price)),
                Cell::Number(l.service_fee),
                Cell::Number(l.minimum_nights.map(|n| n as f64)),
            ]
        })
        .collect();
    Table { columns, rows }
}
