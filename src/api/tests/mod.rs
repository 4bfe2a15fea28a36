//! Tests for the API layer
//!
//! `query_tests` exercise endpoint logic directly; `handler_tests` go
//! through the axum extractors and response conversion.

pub mod handler_tests;

use crate::models::Record;
use crate::store::MemoryStore;
use chrono::{TimeZone, Utc};
use mongodb::bson::{self, doc};
use std::sync::Arc;

/// A sensor reading at 2024-05-`day` `hour`:00 UTC
pub fn reading(day: u32, hour: u32, sensor: &str, value: f64) -> Record {
    let at = Utc.with_ymd_and_hms(2024, 5, day, hour, 0, 0).unwrap();
    doc! {
        "timestamp": bson::DateTime::from_millis(at.timestamp_millis()),
        "sensor": sensor,
        "value": value,
    }
}

/// Five readings over four days, inserted out of order, two sharing a timestamp
pub async fn seeded_store() -> Arc<MemoryStore> {
    Arc::new(
        MemoryStore::with_records(vec![
            reading(3, 6, "b", 30.0),
            reading(1, 0, "a", 10.0),
            reading(2, 12, "a", 20.0),
            reading(2, 12, "b", 21.0),
            reading(4, 18, "c", 40.0),
        ])
        .await,
    )
}
