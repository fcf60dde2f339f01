use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::DateRange;

/// Store identity and static attributes shown in the dashboard header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StoreInfo {
    /// Store identifier
    pub id: i32,
    /// Store category (a/b/c/d)
    pub store_type: String,
    /// Distance to the nearest competitor in meters (median-imputed)
    pub competition_distance: f64,
}

/// Scalar metrics over the filtered view.
///
/// Averages over an empty view are `None` and serialize as JSON null; JSON
/// has no NaN, so "undefined" is expressed as absence here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SummaryMetrics {
    /// Mean daily sales over the view
    pub average_sales: Option<f64>,
    /// Mean daily customer count over the view
    pub average_customers: Option<f64>,
    /// Number of days with a promotion active
    pub promo_days: i64,
}

/// One point of the sales-over-time line chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SalesPoint {
    pub date: NaiveDate,
    pub sales: i64,
}

/// One point of the customers-vs-sales scatter chart.
///
/// `sales` doubles as the size channel, `promo` as the color channel and
/// `month` as the animation dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ScatterPoint {
    pub customers: i64,
    pub sales: i64,
    pub promo: i32,
    pub month: i32,
}

/// Everything a client needs to render the dashboard for one selection
/// (store + date window).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DashboardPayload {
    pub store: StoreInfo,
    /// The window the metrics and series were computed over
    pub range: DateRange,
    pub metrics: SummaryMetrics,
    /// Line chart data, sorted by date
    pub sales_over_time: Vec<SalesPoint>,
    /// Scatter chart data
    pub sales_vs_customers: Vec<ScatterPoint>,
}
