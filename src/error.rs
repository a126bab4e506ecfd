use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to fetch dataset: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("expected a CSV download but got `{0}` content")]
    UnexpectedContent(String),
    #[error("dataset is missing required column `{0}`")]
    MissingColumn(&'static str),
    #[error("no rows with country `{0}`")]
    CountryAbsent(String),
    #[error("row {row}: cannot parse `{value}` as a currency amount")]
    InvalidCurrency { row: usize, value: String },
    #[error("{boroughs} boroughs but the palette only has {palette} colors")]
    PaletteExhausted { boroughs: usize, palette: usize },
    #[error("unknown borough `{0}`")]
    UnknownBorough(String),
    #[error("unknown room type `{0}`")]
    UnknownRoomType(String),
    #[error("invalid price range [{low}, {high}]")]
    InvalidPriceRange { low: f64, high: f64 },
    #[error("dataset has no listings after cleaning")]
    EmptyDataset,
}

pub type Result<T> = std::result::Result<T, ExplorerError>;
