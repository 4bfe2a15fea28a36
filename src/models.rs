//! Core data structures shared by the API and the loader.
//!
//! Records are schema-free BSON documents; only `timestamp` and the
//! store-assigned `_id` carry meaning here.

use crate::timestamp::{TimestampError, parse_timestamp};
use chrono::{DateTime, Utc};
use mongodb::bson::{self, Bson, Document};
use std::path::PathBuf;
use std::time::Duration;

/// One stored document: an ordered map of field names to BSON values
pub type Record = Document;

/// Inclusive time interval used by the range query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Parse both bounds; the first failure wins
    pub fn parse(start: &str, end: &str) -> Result<Self, TimestampError> {
        Ok(Self {
            start: parse_timestamp(start)?,
            end: parse_timestamp(end)?,
        })
    }

    /// Bounds as BSON dates (millisecond precision)
    pub fn bson_bounds(&self) -> (bson::DateTime, bson::DateTime) {
        (to_bson_datetime(self.start), to_bson_datetime(self.end))
    }

    /// Whether a BSON value falls inside the range; non-dates never do
    pub fn contains(&self, value: &Bson) -> bool {
        let (start, end) = self.bson_bounds();
        match value {
            Bson::DateTime(at) => start <= *at && *at <= end,
            _ => false,
        }
    }
}

/// Convert a chrono instant to a BSON date
pub fn to_bson_datetime(instant: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(instant.timestamp_millis())
}

/// Outcome of one loader run
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub input_path: PathBuf,
    pub rows_read: usize,
    pub records_inserted: usize,
    pub index_ensured: bool,
    pub dry_run: bool,
    pub elapsed: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_range_contains_is_inclusive() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let range = TimeRange::new(start, end);

        assert!(range.contains(&Bson::DateTime(to_bson_datetime(start))));
        assert!(range.contains(&Bson::DateTime(to_bson_datetime(end))));
        assert!(!range.contains(&Bson::DateTime(bson::DateTime::from_millis(
            end.timestamp_millis() + 1
        ))));
        assert!(!range.contains(&Bson::String("2024-01-01T12:00:00Z".to_string())));
    }

    #[test]
    fn test_range_parse_reports_bad_bound() {
        assert!(TimeRange::parse("2024-01-01", "2024-01-02").is_ok());
        assert!(TimeRange::parse("2024-01-01", "tomorrow").is_err());
        assert!(TimeRange::parse("yesterday", "2024-01-02").is_err());
    }
}
