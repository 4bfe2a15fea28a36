//! Records Service Library
//!
//! A read-only HTTP API over a MongoDB collection of timestamped records,
//! and the loader that fills that collection from a Parquet file.
//!
//! This library provides:
//! - An inclusive time-range query sorted by timestamp, with structured
//!   `date_parse_error` / `no_data_in_range` failures
//! - Sample and full-collection queries plus a liveness check
//! - JSON-safe record serialization (store identifiers become strings)
//! - A bulk loader that inserts every Parquet row and indexes `timestamp`
//! - A `RecordStore` trait with MongoDB and in-memory implementations

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod loader;
pub mod models;
pub mod serializer;
pub mod store;
pub mod timestamp;

pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use config::{LoaderConfig, ServerConfig, StoreConfig};
pub use error::{RecordsError, Result};
pub use models::{LoadReport, Record, TimeRange};
pub use store::{MemoryStore, MongoStore, RecordStore};
