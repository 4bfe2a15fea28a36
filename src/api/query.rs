//! Endpoint logic, independent of the HTTP framework.
//!
//! Each function takes the shared store and returns the response body.
//! Store errors are returned as `Err` untouched; only the range query's
//! two structured failures are turned into bodies.

use super::responses::{CheckResponse, ListResponse, QueryFailure, RangeResponse};
use crate::error::Result;
use crate::models::TimeRange;
use crate::serializer::records_to_json;
use crate::store::RecordStore;
use tracing::{debug, info, warn};

/// Liveness: always reachable, never consults the store
pub fn liveness() -> CheckResponse {
    CheckResponse::reachable()
}

/// Records within `[start_time, end_time]`, ascending by timestamp
pub async fn range_query(
    store: &dyn RecordStore,
    start_time: &str,
    end_time: &str,
) -> Result<RangeResponse> {
    info!("Range query: {} to {}", start_time, end_time);

    let range = match TimeRange::parse(start_time, end_time) {
        Ok(range) => range,
        Err(e) => {
            warn!("Date parse error: {}", e);
            return Ok(RangeResponse::failed(QueryFailure::DateParseError));
        }
    };
    debug!("Parsed range: {} to {}", range.start, range.end);

    let records = store.find_in_range(&range).await?;
    info!("Found {} records", records.len());

    if records.is_empty() {
        return Ok(RangeResponse::failed(QueryFailure::NoDataInRange));
    }

    Ok(RangeResponse::found(records_to_json(records)))
}

/// Up to `limit` records in natural store order
pub async fn sample_query(store: &dyn RecordStore, limit: i64) -> Result<ListResponse> {
    let records = store.find_sample(limit).await?;
    debug!("Sample of {} records (limit {})", records.len(), limit);
    Ok(ListResponse::new(records_to_json(records)))
}

/// The whole collection, ascending by timestamp
pub async fn full_query(store: &dyn RecordStore) -> Result<ListResponse> {
    let records = store.find_all_sorted().await?;
    debug!("Returning all {} records", records.len());
    Ok(ListResponse::new(records_to_json(records)))
}
