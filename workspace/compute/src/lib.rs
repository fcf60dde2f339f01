//! The analytics pipeline: ETL loader, filter layer, summary statistics
//! and the sales forecaster. Everything operates on polars DataFrames and
//! flows strictly one way: loader -> filter -> stats/forecast.

pub mod error;
pub mod filter;
pub mod forecast;
pub mod loader;
pub mod stats;

pub use error::{ComputeError, Result};
pub use loader::{load_datasets, LoadedData};

#[cfg(test)]
pub(crate) mod testdata;
