//! Shared fixtures for integration tests

#![allow(dead_code)]

use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// 2024-06-01T00:00:00Z in epoch milliseconds
pub const BASE_MILLIS: i64 = 1_717_200_000_000;

pub const HOUR_MILLIS: i64 = 3_600_000;

/// Write a results-style Parquet file: one row per hour offset, in the
/// order given, with a nanosecond datetime `timestamp` column
pub fn write_results_parquet(dir: &TempDir, hour_offsets: &[i64]) -> PathBuf {
    let nanos: Vec<i64> = hour_offsets
        .iter()
        .map(|h| (BASE_MILLIS + h * HOUR_MILLIS) * 1_000_000)
        .collect();
    let timestamp = Series::new("timestamp".into(), nanos)
        .cast(&DataType::Datetime(TimeUnit::Nanoseconds, None))
        .unwrap();
    let sensor: Vec<String> = hour_offsets.iter().map(|h| format!("s{}", h)).collect();
    let value: Vec<f64> = hour_offsets.iter().map(|h| *h as f64 * 0.5).collect();
    let flagged: Vec<bool> = hour_offsets.iter().map(|h| h % 2 == 0).collect();

    let mut df = DataFrame::new(vec![
        timestamp.into(),
        Series::new("sensor".into(), sensor).into(),
        Series::new("value".into(), value).into(),
        Series::new("flagged".into(), flagged).into(),
    ])
    .unwrap();

    let path = dir.path().join("results.parquet");
    write_parquet(&path, &mut df);
    path
}

/// Write an arbitrary frame to `path`
pub fn write_parquet(path: &Path, df: &mut DataFrame) {
    ParquetWriter::new(File::create(path).unwrap())
        .finish(df)
        .unwrap();
}

/// BASE + `hours` as the API renders timestamps: naive UTC, whole seconds
pub fn iso_at(hours: i64) -> String {
    chrono::DateTime::from_timestamp_millis(BASE_MILLIS + hours * HOUR_MILLIS)
        .unwrap()
        .naive_utc()
        .format("%Y-%m-%dT%H:%M:%S")
        .to_string()
}
