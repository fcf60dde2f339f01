//! Sales forecaster: an additive seasonal regression over the filtered
//! view's (date, sales) pairs.
//!
//! The model is a linear trend plus weekly and yearly Fourier seasonality,
//! fit by ridge-damped least squares. Uncertainty bounds are the central
//! estimate plus/minus a normal quantile of the in-sample residual spread
//! (80% interval). The output covers every observed date followed by the
//! requested horizon of daily projections.

use chrono::{Duration, NaiveDate};
use common::ForecastPoint;
use model::columns;
use polars::prelude::*;
use tracing::{debug, instrument};

use crate::error::{ComputeError, Result};

/// Default projection length past the last observed date.
pub const DEFAULT_HORIZON_DAYS: usize = 180;

const WEEKLY_PERIOD: f64 = 7.0;
const YEARLY_PERIOD: f64 = 365.25;
const WEEKLY_ORDER: usize = 3;
const YEARLY_ORDER: usize = 4;
/// Half-width multiplier for an 80% normal interval.
const INTERVAL_Z: f64 = 1.2816;
/// Damping that keeps the normal equations solvable when the series is
/// shorter than a full seasonal cycle.
const RIDGE: f64 = 1e-6;

const N_FEATURES: usize = 2 + 2 * (WEEKLY_ORDER + YEARLY_ORDER);

/// Fits the seasonal model on the view's (date, sales) pairs and predicts
/// over the observed dates plus `horizon_days` daily steps beyond the last
/// one.
///
/// Fails with [`ComputeError::ForecastFit`] when fewer than two distinct
/// observation dates are available.
#[instrument(skip(view))]
pub fn forecast_sales(view: &DataFrame, horizon_days: usize) -> Result<Vec<ForecastPoint>> {
    let observations = extract_observations(view)?;
    if observations.len() < 2 {
        return Err(ComputeError::ForecastFit(format!(
            "need at least 2 distinct observation dates, got {}",
            observations.len()
        )));
    }

    let origin = observations[0].0;
    let elapsed = |date: NaiveDate| (date - origin).num_days() as f64;

    // Normal equations with ridge damping.
    let mut xtx = [[0.0f64; N_FEATURES]; N_FEATURES];
    let mut xty = [0.0f64; N_FEATURES];
    for &(date, sales) in &observations {
        let x = features(elapsed(date));
        for i in 0..N_FEATURES {
            xty[i] += x[i] * sales;
            for j in 0..N_FEATURES {
                xtx[i][j] += x[i] * x[j];
            }
        }
    }
    for (i, row) in xtx.iter_mut().enumerate() {
        row[i] += RIDGE;
    }
    let beta = solve(xtx, xty)?;

    let predict = |date: NaiveDate| -> f64 {
        let x = features(elapsed(date));
        x.iter().zip(beta.iter()).map(|(a, b)| a * b).sum()
    };

    let residual_sq: f64 = observations
        .iter()
        .map(|&(date, sales)| (sales - predict(date)).powi(2))
        .sum();
    let sigma = (residual_sq / (observations.len() - 1).max(1) as f64).sqrt();
    debug!(
        observations = observations.len(),
        sigma, "seasonal model fit"
    );

    let last = observations[observations.len() - 1].0;
    let future = (1..=horizon_days as i64).map(|offset| last + Duration::days(offset));
    let points = observations
        .iter()
        .map(|&(date, _)| date)
        .chain(future)
        .map(|date| {
            let central = predict(date);
            ForecastPoint {
                date,
                forecast: central,
                lower: central - INTERVAL_Z * sigma,
                upper: central + INTERVAL_Z * sigma,
            }
        })
        .collect();
    Ok(points)
}

/// Distinct (date, sales) pairs of the view, sorted by date.
fn extract_observations(view: &DataFrame) -> Result<Vec<(NaiveDate, f64)>> {
    let dates = view
        .column(columns::DATE)?
        .as_materialized_series()
        .date()?;
    let sales = view.column(columns::SALES)?.i64()?;

    let mut observations: Vec<(NaiveDate, f64)> = dates
        .as_date_iter()
        .zip(sales)
        .filter_map(|(date, sales)| Some((date?, sales? as f64)))
        .collect();
    observations.sort_by_key(|&(date, _)| date);
    observations.dedup_by_key(|&mut (date, _)| date);
    Ok(observations)
}

fn features(t: f64) -> [f64; N_FEATURES] {
    let mut x = [0.0; N_FEATURES];
    x[0] = 1.0;
    x[1] = t;
    let mut idx = 2;
    for (period, order) in [(WEEKLY_PERIOD, WEEKLY_ORDER), (YEARLY_PERIOD, YEARLY_ORDER)] {
        for k in 1..=order {
            let arg = std::f64::consts::TAU * k as f64 * t / period;
            x[idx] = arg.sin();
            x[idx + 1] = arg.cos();
            idx += 2;
        }
    }
    x
}

/// Gaussian elimination with partial pivoting. The ridge term keeps the
/// system nonsingular for any input, so a vanishing pivot means the series
/// was degenerate after all.
fn solve(
    mut a: [[f64; N_FEATURES]; N_FEATURES],
    mut b: [f64; N_FEATURES],
) -> Result<[f64; N_FEATURES]> {
    for pivot in 0..N_FEATURES {
        let mut best = pivot;
        for row in pivot + 1..N_FEATURES {
            if a[row][pivot].abs() > a[best][pivot].abs() {
                best = row;
            }
        }
        a.swap(pivot, best);
        b.swap(pivot, best);

        let diagonal = a[pivot][pivot];
        if diagonal.abs() < f64::EPSILON {
            return Err(ComputeError::ForecastFit(
                "degenerate design matrix".to_string(),
            ));
        }
        for row in pivot + 1..N_FEATURES {
            let factor = a[row][pivot] / diagonal;
            if factor == 0.0 {
                continue;
            }
            for column in pivot..N_FEATURES {
                a[row][column] -= factor * a[pivot][column];
            }
            b[row] -= factor * b[pivot];
        }
    }

    let mut x = [0.0; N_FEATURES];
    for pivot in (0..N_FEATURES).rev() {
        let mut sum = b[pivot];
        for column in pivot + 1..N_FEATURES {
            sum -= a[pivot][column] * x[column];
        }
        x[pivot] = sum / a[pivot][pivot];
    }
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::filtered_view;
    use crate::testdata::load_fixture;
    use common::DateRange;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn store2_view() -> (tempfile::TempDir, DataFrame) {
        let (dir, data) = load_fixture();
        let range = DateRange::new(date(2015, 1, 1), date(2015, 1, 30));
        let view = filtered_view(&data.working, 2, &range).unwrap();
        (dir, view)
    }

    #[test]
    fn horizon_extends_observations_by_requested_days() {
        let (_dir, view) = store2_view();
        let points = forecast_sales(&view, DEFAULT_HORIZON_DAYS).unwrap();
        assert_eq!(points.len(), 30 + DEFAULT_HORIZON_DAYS);
    }

    #[test]
    fn dates_are_strictly_increasing_and_bounds_ordered() {
        let (_dir, view) = store2_view();
        let points = forecast_sales(&view, DEFAULT_HORIZON_DAYS).unwrap();
        assert!(points.windows(2).all(|w| w[0].date < w[1].date));
        for p in &points {
            assert!(p.forecast.is_finite());
            assert!(p.lower <= p.forecast && p.forecast <= p.upper);
        }
    }

    #[test]
    fn fit_tracks_a_weekly_pattern_with_trend() {
        // Store 2's fixture signal is a weekly sawtooth plus a linear
        // trend, which the weekly harmonics represent exactly.
        let (_dir, view) = store2_view();
        let points = forecast_sales(&view, 0).unwrap();

        let sales = view.column(columns::SALES).unwrap().i64().unwrap();
        for (i, p) in points.iter().enumerate() {
            let actual = sales.get(i).unwrap() as f64;
            assert!(
                (p.forecast - actual).abs() < 50.0,
                "day {i}: forecast {} vs actual {actual}",
                p.forecast
            );
        }
    }

    #[test]
    fn too_short_series_fails_to_fit() {
        let (_dir, data) = load_fixture();
        let one_day = DateRange::new(date(2015, 1, 1), date(2015, 1, 1));
        let view = filtered_view(&data.working, 1, &one_day).unwrap();
        match forecast_sales(&view, DEFAULT_HORIZON_DAYS) {
            Err(ComputeError::ForecastFit(_)) => {}
            other => panic!("expected ForecastFit, got {other:?}"),
        }
    }

    #[test]
    fn short_but_valid_series_still_forecasts() {
        let (_dir, data) = load_fixture();
        let range = DateRange::new(date(2015, 1, 1), date(2015, 1, 10));
        let view = filtered_view(&data.working, 1, &range).unwrap();
        // 8 rows survive cleaning for store 1.
        let points = forecast_sales(&view, 180).unwrap();
        assert_eq!(points.len(), 8 + 180);
    }
}
