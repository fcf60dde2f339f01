use axum::{
    extract::{Path, State},
    response::Json,
};
use common::{DateRange, StoreInfo};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use crate::helpers::selection::store_info;
use crate::schemas::{ApiError, ApiResponse, AppState};

/// A store's metadata together with its observed transaction window.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StoreDetail {
    pub store: StoreInfo,
    /// [min, max] transaction dates for this store, absent when the store
    /// has no rows in the working table
    pub observed_range: Option<DateRange>,
}

/// List the selector domain: distinct store identifiers in the working table
#[utoipa::path(
    get,
    path = "/api/v1/stores",
    tag = "stores",
    responses(
        (status = 200, description = "Store list retrieved successfully", body = ApiResponse<Vec<i32>>),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn list_stores(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<i32>>>, ApiError> {
    let data = state.datasets().await?;
    let ids = compute::filter::store_ids(&data.working)?;

    let response = ApiResponse {
        data: ids,
        message: "Store list retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Get metadata and the observed date window for one store
#[utoipa::path(
    get,
    path = "/api/v1/stores/{store_id}",
    tag = "stores",
    params(
        ("store_id" = i32, Path, description = "Store ID"),
    ),
    responses(
        (status = 200, description = "Store retrieved successfully", body = ApiResponse<StoreDetail>),
        (status = 404, description = "Store not found", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn get_store(
    Path(store_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<StoreDetail>>, ApiError> {
    let data = state.datasets().await?;
    let meta = compute::filter::store_meta(&data.stores, store_id)?;
    let observed_range = compute::filter::observed_date_range(&data.working, store_id)?;

    let detail = StoreDetail {
        store: store_info(meta),
        observed_range,
    };
    let response = ApiResponse {
        data: detail,
        message: "Store retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}
