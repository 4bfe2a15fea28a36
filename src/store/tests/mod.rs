//! Tests for the record store implementations
//!
//! Everything here runs against `MemoryStore`; the MongoDB store shares
//! the trait contract but needs a live server.


use crate::models::Record;
use chrono::{TimeZone, Utc};
use mongodb::bson::{self, doc};

/// A reading taken at the given UTC hour on 2024-03-`day`
pub fn reading_at(day: u32, hour: u32, value: f64) -> Record {
    let at = Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap();
    doc! {
        "timestamp": bson::DateTime::from_millis(at.timestamp_millis()),
        "value": value,
    }
}

/// Readings deliberately inserted out of time order
pub fn unordered_readings() -> Vec<Record> {
    vec![
        reading_at(3, 0, 3.0),
        reading_at(1, 0, 1.0),
        reading_at(2, 12, 2.5),
        reading_at(2, 0, 2.0),
        reading_at(4, 0, 4.0),
    ]
}
