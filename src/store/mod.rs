//! Document store access.
//!
//! `RecordStore` is the seam between the service and wherever records
//! live. `MongoStore` talks to MongoDB; `MemoryStore` keeps records in
//! process and mirrors MongoDB's ordering and limit semantics.

pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

use crate::error::Result;
use crate::models::{Record, TimeRange};
use async_trait::async_trait;

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Records with `start <= timestamp <= end`, ascending by timestamp
    async fn find_in_range(&self, range: &TimeRange) -> Result<Vec<Record>>;

    /// Up to `limit` records in natural order (store-defined limit semantics)
    async fn find_sample(&self, limit: i64) -> Result<Vec<Record>>;

    /// Every record, ascending by timestamp
    async fn find_all_sorted(&self) -> Result<Vec<Record>>;

    /// Insert all records in one bulk operation, returning the inserted count
    async fn insert_many(&self, records: Vec<Record>) -> Result<usize>;

    /// Create the ascending timestamp index if it does not exist
    async fn ensure_timestamp_index(&self) -> Result<()>;

    /// Round-trip to the store to prove it is reachable
    async fn ping(&self) -> Result<()>;

    /// Release the connection; called once on shutdown
    async fn close(&self);
}

#[cfg(test)]
mod tests;
