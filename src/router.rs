use crate::handlers::{
    about::about,
    dashboard::get_dashboard,
    datasets::reload_datasets,
    forecast::get_forecast,
    health::health_check,
    stores::{get_store, list_stores},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Store selector routes
        .route("/api/v1/stores", get(list_stores))
        .route("/api/v1/stores/:store_id", get(get_store))
        // Render payload routes
        .route("/api/v1/stores/:store_id/dashboard", get(get_dashboard))
        .route("/api/v1/stores/:store_id/forecast", get(get_forecast))
        // Dataset cache management
        .route("/api/v1/datasets/reload", post(reload_datasets))
        // Informational
        .route("/api/v1/about", get(about))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
