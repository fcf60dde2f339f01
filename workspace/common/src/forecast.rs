use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One row of the forecast chart: the central estimate and its lower/upper
/// uncertainty bounds for a single date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub forecast: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Forecast over the full extended horizon: the historical dates followed
/// by `horizon_days` projected ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ForecastSeries {
    pub store_id: i32,
    /// Number of observed days the model was fit on
    pub observed_days: usize,
    /// Number of projected days past the last observation
    pub horizon_days: usize,
    pub points: Vec<ForecastPoint>,
}
