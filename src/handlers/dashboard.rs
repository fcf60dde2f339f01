use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use common::DashboardPayload;
use tracing::instrument;

use crate::helpers::selection::{resolve_range, store_info};
use crate::schemas::{ApiError, ApiResponse, AppState, DashboardQuery};

/// Get the dashboard render payload for one store and date window
///
/// Metrics and chart series are computed over the filtered view. Missing
/// window bounds default to the store's observed [min, max] dates; an
/// inverted window yields empty series and undefined (null) averages.
#[utoipa::path(
    get,
    path = "/api/v1/stores/{store_id}/dashboard",
    tag = "dashboard",
    params(
        ("store_id" = i32, Path, description = "Store ID"),
    ),
    responses(
        (status = 200, description = "Dashboard retrieved successfully", body = ApiResponse<DashboardPayload>),
        (status = 404, description = "Store not found", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn get_dashboard(
    Path(store_id): Path<i32>,
    Query(query): Query<DashboardQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DashboardPayload>>, ApiError> {
    let data = state.datasets().await?;
    let meta = compute::filter::store_meta(&data.stores, store_id)?;
    let observed = compute::filter::observed_date_range(&data.working, store_id)?;
    let range = resolve_range(store_id, query.start_date, query.end_date, observed)?;

    let view = compute::filter::filtered_view(&data.working, store_id, &range)?;
    let metrics = compute::stats::summary_metrics(&view)?;
    let sales_over_time = compute::stats::sales_over_time(&view)?;
    let sales_vs_customers = compute::stats::sales_vs_customers(&view)?;

    let payload = DashboardPayload {
        store: store_info(meta),
        range,
        metrics,
        sales_over_time,
        sales_vs_customers,
    };
    let response = ApiResponse {
        data: payload,
        message: "Dashboard retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}
