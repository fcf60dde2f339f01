use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use crate::schemas::{ApiError, ApiResponse, AppState};

/// Row counts of the freshly loaded tables.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DatasetSummary {
    pub working_rows: usize,
    pub store_rows: usize,
}

/// Invalidate the dataset cache and re-read both CSV sources
#[utoipa::path(
    post,
    path = "/api/v1/datasets/reload",
    tag = "datasets",
    responses(
        (status = 200, description = "Datasets reloaded successfully", body = ApiResponse<DatasetSummary>),
        (status = 500, description = "A source could not be read", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn reload_datasets(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DatasetSummary>>, ApiError> {
    let data = state.reload_datasets().await?;

    let summary = DatasetSummary {
        working_rows: data.working.height(),
        store_rows: data.stores.height(),
    };
    let response = ApiResponse {
        data: summary,
        message: "Datasets reloaded successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}
