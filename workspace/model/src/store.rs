use serde::{Deserialize, Serialize};

/// Static metadata for a single store, resolved from the cleaned metadata
/// table after median imputation, so `competition_distance` is always
/// present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreMeta {
    pub id: i32,
    pub store_type: String,
    pub competition_distance: f64,
}
