//! Filter layer: restricts the working table to one store and an inclusive
//! date window, and resolves per-store metadata.

use chrono::NaiveDate;
use common::DateRange;
use model::{columns, StoreMeta};
use polars::prelude::*;
use tracing::instrument;

use crate::error::{ComputeError, Result};

/// Rows of the working table matching `store_id` with a date inside the
/// inclusive `range`, sorted by date.
///
/// An inverted range (start past end) selects nothing and is not an error.
#[instrument(skip(working))]
pub fn filtered_view(working: &DataFrame, store_id: i32, range: &DateRange) -> Result<DataFrame> {
    let view = working
        .clone()
        .lazy()
        .filter(
            col(columns::STORE)
                .eq(lit(store_id))
                .and(col(columns::DATE).gt_eq(lit(range.start)))
                .and(col(columns::DATE).lt_eq(lit(range.end))),
        )
        .sort([columns::DATE], SortMultipleOptions::default())
        .collect()?;
    Ok(view)
}

/// The selector domain: sorted distinct store identifiers present in the
/// working table.
pub fn store_ids(working: &DataFrame) -> Result<Vec<i32>> {
    let ids = working.column(columns::STORE)?.i32()?;
    let mut out: Vec<i32> = ids.into_iter().flatten().collect();
    out.sort_unstable();
    out.dedup();
    Ok(out)
}

/// Default date window for a store: [min, max] of its observed dates, or
/// `None` when the store has no rows in the working table.
pub fn observed_date_range(working: &DataFrame, store_id: i32) -> Result<Option<DateRange>> {
    let mask = working.column(columns::STORE)?.i32()?.equal(store_id);
    let subset = working.filter(&mask)?;
    let dates = subset
        .column(columns::DATE)?
        .as_materialized_series()
        .date()?;

    let mut min: Option<NaiveDate> = None;
    let mut max: Option<NaiveDate> = None;
    for date in dates.as_date_iter().flatten() {
        min = Some(min.map_or(date, |m| m.min(date)));
        max = Some(max.map_or(date, |m| m.max(date)));
    }
    Ok(match (min, max) {
        (Some(start), Some(end)) => Some(DateRange::new(start, end)),
        _ => None,
    })
}

/// Resolves the metadata record for one store from the cleaned metadata
/// table. Absent identifiers are an explicit error rather than a panic;
/// given the inner-join invariant this is unreachable for ids taken from
/// the working table, but selections arrive from clients.
pub fn store_meta(stores: &DataFrame, store_id: i32) -> Result<StoreMeta> {
    let mask = stores.column(columns::STORE)?.i32()?.equal(store_id);
    let row = stores.filter(&mask)?;
    if row.height() == 0 {
        return Err(ComputeError::StoreNotFound(store_id));
    }

    let store_type = row
        .column(columns::STORE_TYPE)?
        .str()?
        .get(0)
        .unwrap_or_default()
        .to_string();
    let competition_distance = row
        .column(columns::COMPETITION_DISTANCE)?
        .f64()?
        .get(0)
        .unwrap_or(0.0);

    Ok(StoreMeta {
        id: store_id,
        store_type,
        competition_distance,
    })
}
