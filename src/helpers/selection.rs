use chrono::NaiveDate;
use common::{DateRange, StoreInfo};
use model::StoreMeta;

use crate::schemas::ApiError;

/// Resolves the effective date window for a selection: explicit bounds win,
/// missing ones default to the store's observed [min, max] dates.
///
/// A store with no transaction rows has no observable default, so the
/// selection must carry both bounds.
pub fn resolve_range(
    store_id: i32,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    observed: Option<DateRange>,
) -> Result<DateRange, ApiError> {
    match (start, end, observed) {
        (Some(start), Some(end), _) => Ok(DateRange::new(start, end)),
        (start, end, Some(observed)) => Ok(DateRange::new(
            start.unwrap_or(observed.start),
            end.unwrap_or(observed.end),
        )),
        _ => Err(ApiError::NotFound(format!(
            "store {store_id} has no transaction data to derive a default date range"
        ))),
    }
}

/// Transport shape of a metadata record.
pub fn store_info(meta: StoreMeta) -> StoreInfo {
    StoreInfo {
        id: meta.id,
        store_type: meta.store_type,
        competition_distance: meta.competition_distance,
    }
}
