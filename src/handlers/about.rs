use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use crate::schemas::ApiResponse;

/// Static documentation block shown on the dashboard. Informational only.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AboutResponse {
    pub name: String,
    pub description: String,
    /// Note on the alternative large-scale-processing implementation
    pub large_scale_note: String,
}

/// Describe the service and its large-scale-processing lineage
#[utoipa::path(
    get,
    path = "/api/v1/about",
    tag = "health",
    responses(
        (status = 200, description = "Service description", body = ApiResponse<AboutResponse>)
    )
)]
#[instrument]
pub async fn about() -> Json<ApiResponse<AboutResponse>> {
    let data = AboutResponse {
        name: "Storepulse".to_string(),
        description: "Sales analytics over daily store transactions: cleaned and joined CSV \
                      sources served as dashboard metrics, chart series and forecasts."
            .to_string(),
        large_scale_note: "An earlier iteration of this pipeline ran on Apache Spark to handle \
                           much larger datasets: the same cleaning (open/sales filter, median \
                           imputation, per-customer ratio) and inner join expressed as \
                           distributed transformations. At this dataset size the single-node \
                           pipeline is cheaper to run and simpler to operate, so the Spark \
                           variant was retired."
            .to_string(),
    };
    Json(ApiResponse {
        data,
        message: "About retrieved successfully".to_string(),
        success: true,
    })
}
