//! ETL for the two CSV sources: read, clean, enrich and join them into the
//! working table a session filters and charts.
//!
//! Cleaning order matters and mirrors the documented pipeline:
//! 1. drop transaction rows with `Open == 0` or `Sales == 0`,
//! 2. impute missing `CompetitionDistance` with the metadata median,
//! 3. zero-fill the remaining metadata gaps,
//! 4. derive date parts and `SalePerCustomer`,
//! 5. inner-join transactions with metadata on `Store`.

use std::path::Path;

use model::{columns, DataSources};
use polars::prelude::*;
use tracing::{debug, info, instrument};

use crate::error::{ComputeError, Result};

/// The cleaned tables a session works with. Cheap to clone (column buffers
/// are shared), treated as immutable once produced.
#[derive(Debug, Clone)]
pub struct LoadedData {
    /// Inner join of cleaned transactions with store metadata
    pub working: DataFrame,
    /// Cleaned store metadata, kept separate for per-store lookups
    pub stores: DataFrame,
}

/// Reads both sources, cleans them and produces the joined working table.
///
/// Fails with [`ComputeError::MissingSource`] before touching either file
/// when one of the paths does not resolve.
#[instrument]
pub fn load_datasets(sources: &DataSources) -> Result<LoadedData> {
    if let Some(missing) = sources.missing_source() {
        return Err(ComputeError::MissingSource(missing.to_path_buf()));
    }

    info!("loading transaction source {:?}", sources.transactions);
    let transactions = read_csv(&sources.transactions, true)?;
    info!("loading store metadata source {:?}", sources.stores);
    let stores_raw = read_csv(&sources.stores, false)?;

    let stores = clean_store_metadata(stores_raw)?;
    let cleaned = clean_transactions(transactions)?;

    let working = cleaned
        .lazy()
        .join(
            stores.clone().lazy(),
            [col(columns::STORE)],
            [col(columns::STORE)],
            JoinArgs::new(JoinType::Inner),
        )
        .collect()?;

    debug!(
        rows = working.height(),
        stores = stores.height(),
        "datasets loaded and joined"
    );
    Ok(LoadedData { working, stores })
}

fn read_csv(path: &Path, parse_dates: bool) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(1000))
        .with_parse_options(CsvParseOptions::default().with_try_parse_dates(parse_dates))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    Ok(df)
}

/// Drops closed and zero-sales days, then derives date parts and the
/// per-customer sales ratio.
///
/// `SalePerCustomer` is an IEEE f64 division: a day with zero customers
/// yields `inf`, which flows through to display untouched.
fn clean_transactions(df: DataFrame) -> Result<DataFrame> {
    let df = df
        .lazy()
        .filter(
            col(columns::OPEN)
                .neq(lit(0))
                .and(col(columns::SALES).neq(lit(0))),
        )
        .with_columns([col(columns::STORE).cast(DataType::Int32)])
        .with_columns([
            col(columns::DATE)
                .dt()
                .year()
                .cast(DataType::Int32)
                .alias(columns::YEAR),
            col(columns::DATE)
                .dt()
                .month()
                .cast(DataType::Int32)
                .alias(columns::MONTH),
            col(columns::DATE)
                .dt()
                .day()
                .cast(DataType::Int32)
                .alias(columns::DAY),
            col(columns::DATE)
                .dt()
                .week()
                .cast(DataType::Int32)
                .alias(columns::WEEK_OF_YEAR),
            (col(columns::SALES).cast(DataType::Float64)
                / col(columns::CUSTOMERS).cast(DataType::Float64))
            .alias(columns::SALE_PER_CUSTOMER),
        ])
        .collect()?;
    Ok(df)
}

/// Imputes `CompetitionDistance` with the median of the metadata table
/// itself, then defaults every remaining gap: numeric columns to 0, string
/// columns to the empty string.
fn clean_store_metadata(df: DataFrame) -> Result<DataFrame> {
    let df = df
        .lazy()
        .with_columns([
            col(columns::STORE).cast(DataType::Int32),
            // NaN in the source is missing data, not a measurement
            col(columns::COMPETITION_DISTANCE)
                .cast(DataType::Float64)
                .fill_nan(lit(NULL)),
        ])
        .with_columns([col(columns::COMPETITION_DISTANCE)
            .fill_null(col(columns::COMPETITION_DISTANCE).median())])
        .with_columns([
            dtype_cols([DataType::Int32, DataType::Int64, DataType::Float64]).fill_null(lit(0)),
            dtype_col(&DataType::String).fill_null(lit("")),
        ])
        .collect()?;
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testdata::{load_fixture, write_fixture};

    #[test]
    fn missing_transaction_source_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let sources = DataSources::from_data_dir(dir.path());
        let err = load_datasets(&sources).unwrap_err();
        match err {
            ComputeError::MissingSource(path) => {
                assert_eq!(path, sources.transactions);
            }
            other => panic!("expected MissingSource, got {other:?}"),
        }
    }

    #[test]
    fn cleaning_drops_closed_and_zero_sales_rows() {
        let (_dir, data) = load_fixture();
        // Fixture has 10 rows for store 1: one with Open=0, one with
        // Sales=0, both must be gone.
        let open = data.working.column(columns::OPEN).unwrap().i64().unwrap();
        let sales = data.working.column(columns::SALES).unwrap().i64().unwrap();
        assert!(open.into_iter().flatten().all(|v| v != 0));
        assert!(sales.into_iter().flatten().all(|v| v != 0));
    }

    #[test]
    fn sale_per_customer_follows_ieee_division() {
        let (_dir, data) = load_fixture();
        let sales = data.working.column(columns::SALES).unwrap().i64().unwrap();
        let customers = data
            .working
            .column(columns::CUSTOMERS)
            .unwrap()
            .i64()
            .unwrap();
        let ratio = data
            .working
            .column(columns::SALE_PER_CUSTOMER)
            .unwrap()
            .f64()
            .unwrap();
        for i in 0..data.working.height() {
            let s = sales.get(i).unwrap() as f64;
            let c = customers.get(i).unwrap() as f64;
            let r = ratio.get(i).unwrap();
            if c == 0.0 {
                assert!(r.is_infinite());
            } else {
                assert_eq!(r, s / c);
            }
        }
    }

    #[test]
    fn competition_distance_imputed_with_metadata_median() {
        let (_dir, data) = load_fixture();
        // Fixture metadata has distances [10, <missing>, 30]; the gap must
        // become the median of the present values.
        let distances = data
            .stores
            .column(columns::COMPETITION_DISTANCE)
            .unwrap()
            .f64()
            .unwrap();
        let values: Vec<f64> = distances.into_iter().flatten().collect();
        assert_eq!(values, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn metadata_gaps_default_to_zero() {
        let (_dir, data) = load_fixture();
        // Promo2SinceYear has a gap for store 2 that must come back as 0.
        let years = data
            .stores
            .column("Promo2SinceYear")
            .unwrap()
            .i64()
            .unwrap();
        let values: Vec<i64> = years.into_iter().flatten().collect();
        assert_eq!(values, vec![2012, 0, 2014]);
    }

    #[test]
    fn imputation_is_deterministic_across_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let sources = write_fixture(dir.path());
        let first = load_datasets(&sources).unwrap();
        let second = load_datasets(&sources).unwrap();
        assert_eq!(
            first.stores.column(columns::COMPETITION_DISTANCE).unwrap(),
            second.stores.column(columns::COMPETITION_DISTANCE).unwrap()
        );
    }

    #[test]
    fn join_drops_stores_without_metadata() {
        let (_dir, data) = load_fixture();
        // Store 99 has transactions but no metadata row.
        let ids = data.working.column(columns::STORE).unwrap().i32().unwrap();
        assert!(ids.into_iter().flatten().all(|id| id != 99));

        // Every working-table store id is in the metadata id set.
        let meta_ids: Vec<i32> = data
            .stores
            .column(columns::STORE)
            .unwrap()
            .i32()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert!(ids.into_iter().flatten().all(|id| meta_ids.contains(&id)));
    }

    #[test]
    fn date_parts_are_derived() {
        let (_dir, data) = load_fixture();
        for name in [
            columns::YEAR,
            columns::MONTH,
            columns::DAY,
            columns::WEEK_OF_YEAR,
        ] {
            assert!(data.working.column(name).is_ok(), "missing {name}");
        }
        let years = data.working.column(columns::YEAR).unwrap().i32().unwrap();
        assert!(years.into_iter().flatten().all(|y| y == 2015));
    }
}
