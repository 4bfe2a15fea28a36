//! In-process record store.
//!
//! Mirrors the MongoDB behaviour the service depends on: the store
//! assigns `_id`, sorts are stable on `timestamp` (missing or non-date
//! values first), a limit of 0 means "no limit" and a negative limit
//! returns at most its absolute value. Once closed, every call fails.

use super::RecordStore;
use crate::constants::{ID_FIELD, TIMESTAMP_FIELD};
use crate::error::{RecordsError, Result};
use crate::models::{Record, TimeRange};
use async_trait::async_trait;
use mongodb::bson::{self, Bson, oid::ObjectId};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<Record>>,
    indexed: AtomicBool,
    closed: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated through the same path the loader uses
    pub async fn with_records(records: Vec<Record>) -> Self {
        let store = Self::new();
        store.append(records).await;
        store
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    pub fn has_timestamp_index(&self) -> bool {
        self.indexed.load(Ordering::SeqCst)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn check_open(&self) -> Result<()> {
        if self.is_closed() {
            return Err(RecordsError::store_unavailable("memory store is closed"));
        }
        Ok(())
    }

    async fn append(&self, records: Vec<Record>) -> usize {
        let mut guard = self.records.write().await;
        let count = records.len();
        for mut record in records {
            if !record.contains_key(ID_FIELD) {
                record.insert(ID_FIELD, ObjectId::new());
            }
            guard.push(record);
        }
        count
    }
}

/// Sort key matching MongoDB's ascending order for the fields we store:
/// missing/null before dates, dates by instant
fn timestamp_key(record: &Record) -> Option<bson::DateTime> {
    match record.get(TIMESTAMP_FIELD) {
        Some(Bson::DateTime(at)) => Some(*at),
        _ => None,
    }
}

fn sorted_by_timestamp(mut records: Vec<Record>) -> Vec<Record> {
    // `sort_by_key` is stable, so ties keep insertion order
    records.sort_by_key(timestamp_key);
    records
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn find_in_range(&self, range: &TimeRange) -> Result<Vec<Record>> {
        self.check_open()?;
        let matching: Vec<Record> = self
            .records
            .read()
            .await
            .iter()
            .filter(|record| {
                record
                    .get(TIMESTAMP_FIELD)
                    .is_some_and(|value| range.contains(value))
            })
            .cloned()
            .collect();
        debug!("{} records in range", matching.len());
        Ok(sorted_by_timestamp(matching))
    }

    async fn find_sample(&self, limit: i64) -> Result<Vec<Record>> {
        self.check_open()?;
        let guard = self.records.read().await;
        let take = match limit {
            0 => guard.len(),
            n => n.unsigned_abs().min(guard.len() as u64) as usize,
        };
        Ok(guard.iter().take(take).cloned().collect())
    }

    async fn find_all_sorted(&self) -> Result<Vec<Record>> {
        self.check_open()?;
        let all = self.records.read().await.clone();
        Ok(sorted_by_timestamp(all))
    }

    async fn insert_many(&self, records: Vec<Record>) -> Result<usize> {
        self.check_open()?;
        Ok(self.append(records).await)
    }

    async fn ensure_timestamp_index(&self) -> Result<()> {
        self.check_open()?;
        self.indexed.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        self.check_open()
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}
