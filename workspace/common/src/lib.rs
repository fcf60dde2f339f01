//! Transport-layer types shared between the compute pipeline, the HTTP
//! handlers and the integration tests. These structs are the render
//! payloads the API returns, so any client can draw the dashboard without
//! duplicating shapes.

mod dashboard;
mod forecast;

pub use dashboard::{DashboardPayload, SalesPoint, ScatterPoint, StoreInfo, SummaryMetrics};
pub use forecast::{ForecastPoint, ForecastSeries};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// An inclusive date window over the working table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// True when the window selects nothing (start past end).
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_range_is_empty() {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
        assert!(DateRange::new(d(2015, 6, 1), d(2015, 5, 1)).is_empty());
        assert!(!DateRange::new(d(2015, 5, 1), d(2015, 5, 1)).is_empty());
    }

    #[test]
    fn date_range_serializes_as_iso_dates() {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
        let range = DateRange::new(d(2015, 1, 1), d(2015, 12, 31));
        let json = serde_json::to_value(&range).unwrap();
        assert_eq!(json["start"], "2015-01-01");
        assert_eq!(json["end"], "2015-12-31");
    }
}
