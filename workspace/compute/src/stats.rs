//! Summary statistics and chart series over a filtered view. Read-only:
//! nothing here mutates the underlying frames.

use common::{SalesPoint, ScatterPoint, SummaryMetrics};
use model::columns;
use polars::prelude::*;
use tracing::instrument;

use crate::error::Result;

/// Scalar metrics for the dashboard header. Means over an empty view come
/// back as `None`.
#[instrument(skip(view))]
pub fn summary_metrics(view: &DataFrame) -> Result<SummaryMetrics> {
    let average_sales = view.column(columns::SALES)?.as_materialized_series().mean();
    let average_customers = view
        .column(columns::CUSTOMERS)?
        .as_materialized_series()
        .mean();
    let promo_days = view
        .column(columns::PROMO)?
        .as_materialized_series()
        .sum::<i64>()?;

    Ok(SummaryMetrics {
        average_sales,
        average_customers,
        promo_days,
    })
}

/// (date, sales) pairs sorted by date, the line-chart data.
pub fn sales_over_time(view: &DataFrame) -> Result<Vec<SalesPoint>> {
    let sorted = view
        .clone()
        .lazy()
        .sort([columns::DATE], SortMultipleOptions::default())
        .collect()?;

    let dates = sorted
        .column(columns::DATE)?
        .as_materialized_series()
        .date()?;
    let sales = sorted.column(columns::SALES)?.i64()?;

    let points = dates
        .as_date_iter()
        .zip(sales)
        .filter_map(|(date, sales)| {
            Some(SalesPoint {
                date: date?,
                sales: sales?,
            })
        })
        .collect();
    Ok(points)
}

/// Scatter-chart data: customers vs. sales with promotion flag and month.
pub fn sales_vs_customers(view: &DataFrame) -> Result<Vec<ScatterPoint>> {
    let customers = view.column(columns::CUSTOMERS)?.i64()?;
    let sales = view.column(columns::SALES)?.i64()?;
    let promo = view.column(columns::PROMO)?.i64()?;
    let month = view.column(columns::MONTH)?.i32()?;

    let mut points = Vec::with_capacity(view.height());
    for i in 0..view.height() {
        if let (Some(c), Some(s), Some(p), Some(m)) = (
            customers.get(i),
            sales.get(i),
            promo.get(i),
            month.get(i),
        ) {
            points.push(ScatterPoint {
                customers: c,
                sales: s,
                promo: p as i32,
                month: m,
            });
        }
    }
    Ok(points)
}
