pub mod aggregate;
pub mod config;
pub mod controls;
pub mod csv_reader;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod map;
pub mod partition;
pub mod table;

#[cfg(test)]
mod test_support;
