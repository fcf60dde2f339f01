use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use chrono::NaiveDate;
use common::{
    DashboardPayload, DateRange, ForecastPoint, ForecastSeries, SalesPoint, ScatterPoint,
    StoreInfo, SummaryMetrics,
};
use compute::{ComputeError, LoadedData};
use model::DataSources;
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use utoipa::{OpenApi, ToSchema};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// The CSV source pair this session serves
    pub sources: DataSources,
    /// Cache of loaded datasets, keyed by source identity
    pub cache: Cache<String, Arc<LoadedData>>,
}

impl AppState {
    /// The loaded dataset pair, reading and cleaning the sources on the
    /// first call and returning the cached tables afterwards.
    pub async fn datasets(&self) -> Result<Arc<LoadedData>, ComputeError> {
        let key = self.sources.cache_key();
        if let Some(data) = self.cache.get(&key).await {
            return Ok(data);
        }

        let data = Arc::new(compute::load_datasets(&self.sources)?);
        self.cache.insert(key, data.clone()).await;
        Ok(data)
    }

    /// Explicit invalidation: drop the cached tables and re-read the
    /// sources.
    pub async fn reload_datasets(&self) -> Result<Arc<LoadedData>, ComputeError> {
        self.cache.invalidate(&self.sources.cache_key()).await;
        self.datasets().await
    }

    /// Whether the current source pair is present in the cache.
    pub fn datasets_cached(&self) -> bool {
        self.cache.contains_key(&self.sources.cache_key())
    }
}

/// Query parameters for the dashboard endpoint
#[derive(Debug, Deserialize, ToSchema)]
pub struct DashboardQuery {
    /// Start of the date window (YYYY-MM-DD); defaults to the store's
    /// first observed date
    pub start_date: Option<NaiveDate>,
    /// End of the date window (YYYY-MM-DD); defaults to the store's last
    /// observed date
    pub end_date: Option<NaiveDate>,
}

/// Query parameters for the forecast endpoint
#[derive(Debug, Deserialize, ToSchema)]
pub struct ForecastQuery {
    /// Start of the date window (YYYY-MM-DD)
    pub start_date: Option<NaiveDate>,
    /// End of the date window (YYYY-MM-DD)
    pub end_date: Option<NaiveDate>,
    /// Projection length in days past the last observation (default 180)
    pub horizon: Option<usize>,
}

/// API response wrapper
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Dataset cache status
    pub datasets: String,
}

/// Typed handler error. Compute failures surface here as explicit values
/// the presentation layer degrades on, instead of crashing the render.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Unprocessable(String),
    #[error("{0}")]
    Internal(String),
}

impl From<ComputeError> for ApiError {
    fn from(err: ComputeError) -> Self {
        match err {
            ComputeError::StoreNotFound(id) => {
                ApiError::NotFound(format!("store {id} not present in metadata"))
            }
            ComputeError::ForecastFit(msg) => ApiError::Unprocessable(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Unprocessable(_) => (StatusCode::UNPROCESSABLE_ENTITY, "UNPROCESSABLE"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL"),
        };
        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
            success: false,
        };
        (status, Json(body)).into_response()
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::stores::list_stores,
        crate::handlers::stores::get_store,
        crate::handlers::dashboard::get_dashboard,
        crate::handlers::forecast::get_forecast,
        crate::handlers::datasets::reload_datasets,
        crate::handlers::about::about,
    ),
    components(
        schemas(
            ApiResponse<DashboardPayload>,
            ApiResponse<ForecastSeries>,
            ApiResponse<Vec<i32>>,
            ErrorResponse,
            HealthResponse,
            DashboardQuery,
            ForecastQuery,
            DashboardPayload,
            SummaryMetrics,
            SalesPoint,
            ScatterPoint,
            StoreInfo,
            DateRange,
            ForecastSeries,
            ForecastPoint,
            crate::handlers::stores::StoreDetail,
            crate::handlers::datasets::DatasetSummary,
            crate::handlers::about::AboutResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "stores", description = "Store selector and metadata endpoints"),
        (name = "dashboard", description = "Dashboard render payload endpoints"),
        (name = "forecast", description = "Sales forecast endpoints"),
        (name = "datasets", description = "Dataset cache management endpoints"),
    ),
    info(
        title = "Storepulse API",
        description = "Store sales analytics - dashboard metrics, chart series and forecasts over daily transaction data",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
