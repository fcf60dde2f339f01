use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use common::ForecastSeries;
use compute::forecast::DEFAULT_HORIZON_DAYS;
use tracing::instrument;

use crate::helpers::selection::resolve_range;
use crate::schemas::{ApiError, ApiResponse, AppState, ForecastQuery};

const MAX_HORIZON_DAYS: usize = 730;

/// Forecast sales for one store over the extended horizon
///
/// Fits the seasonal model on the filtered view's (date, sales) pairs and
/// returns the historical dates plus `horizon` projected days, each with a
/// central estimate and lower/upper bounds. A view too short to fit
/// degrades to a 422 instead of crashing the render.
#[utoipa::path(
    get,
    path = "/api/v1/stores/{store_id}/forecast",
    tag = "forecast",
    params(
        ("store_id" = i32, Path, description = "Store ID"),
    ),
    responses(
        (status = 200, description = "Forecast computed successfully", body = ApiResponse<ForecastSeries>),
        (status = 404, description = "Store not found", body = crate::schemas::ErrorResponse),
        (status = 422, description = "Series too short or degenerate to fit", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn get_forecast(
    Path(store_id): Path<i32>,
    Query(query): Query<ForecastQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ForecastSeries>>, ApiError> {
    let horizon_days = query.horizon.unwrap_or(DEFAULT_HORIZON_DAYS);
    if horizon_days == 0 || horizon_days > MAX_HORIZON_DAYS {
        return Err(ApiError::Unprocessable(format!(
            "horizon must be between 1 and {MAX_HORIZON_DAYS} days, got {horizon_days}"
        )));
    }

    let data = state.datasets().await?;
    // Resolving metadata first keeps unknown stores a 404, not a fit error.
    compute::filter::store_meta(&data.stores, store_id)?;
    let observed = compute::filter::observed_date_range(&data.working, store_id)?;
    let range = resolve_range(store_id, query.start_date, query.end_date, observed)?;

    let view = compute::filter::filtered_view(&data.working, store_id, &range)?;
    let points = compute::forecast::forecast_sales(&view, horizon_days)?;

    let series = ForecastSeries {
        store_id,
        observed_days: points.len() - horizon_days,
        horizon_days,
        points,
    };
    let response = ApiResponse {
        data: series,
        message: "Forecast computed successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}
