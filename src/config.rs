use anyhow::Result;
use model::DataSources;
use moka::future::Cache;
use std::time::Duration;

use crate::schemas::AppState;

/// Initialize application state for a specific data directory
pub async fn initialize_app_state_with_dir(data_dir: &str) -> Result<AppState> {
    let sources = DataSources::from_data_dir(data_dir);
    tracing::info!("Using data sources: {}", sources.cache_key());

    // Dataset cache, keyed by source identity. One entry per source pair;
    // entries live for the session unless explicitly reloaded.
    let cache = Cache::builder()
        .max_capacity(4)
        .time_to_live(Duration::from_secs(3600)) // 1 hour
        .build();

    Ok(AppState { sources, cache })
}
