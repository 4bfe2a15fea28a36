//! One-shot bulk import of a Parquet file into the records collection.
//!
//! The whole file is read into memory, every row becomes a record, the
//! records go to the store in a single `insert_many`, and the timestamp
//! index is ensured afterwards. Partial failure is whatever the store's
//! bulk insert does; the loader adds no recovery of its own.

pub mod convert;

use crate::config::LoaderConfig;
use crate::constants::TIMESTAMP_FIELD;
use crate::error::{RecordsError, Result};
use crate::models::{LoadReport, Record};
use crate::store::RecordStore;
use indicatif::{ProgressBar, ProgressStyle};
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;
use tracing::{debug, info};

/// Read `path` into records, refusing files without a timestamp column
pub fn read_records(path: &Path) -> Result<Vec<Record>> {
    if !path.exists() {
        return Err(RecordsError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path)?;
    let df = ParquetReader::new(file).finish()?;
    debug!(
        "Read {} rows x {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );

    if df.column(TIMESTAMP_FIELD).is_err() {
        return Err(RecordsError::MissingColumn {
            path: path.to_path_buf(),
            column: TIMESTAMP_FIELD.to_string(),
        });
    }

    convert::dataframe_to_records(&df)
}

pub struct BulkLoader {
    config: LoaderConfig,
    show_progress: bool,
}

impl BulkLoader {
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            config,
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Parquet decoding is blocking; keep it off the async workers
    async fn read(&self) -> Result<Vec<Record>> {
        let path: PathBuf = self.config.input_path.clone();
        info!("Reading {}", path.display());
        task::spawn_blocking(move || read_records(&path))
            .await
            .map_err(|e| RecordsError::Io(std::io::Error::other(e)))?
    }

    /// Read and convert the file without touching any store
    pub async fn dry_run(&self) -> Result<LoadReport> {
        let start_time = Instant::now();
        let records = self.read().await?;
        info!("Dry run: {} records would be inserted", records.len());

        Ok(LoadReport {
            input_path: self.config.input_path.clone(),
            rows_read: records.len(),
            dry_run: true,
            elapsed: start_time.elapsed(),
            ..Default::default()
        })
    }

    /// Full import: read, ping, bulk insert, ensure index
    pub async fn load_into(&self, store: &dyn RecordStore) -> Result<LoadReport> {
        let start_time = Instant::now();
        let records = self.read().await?;
        let rows_read = records.len();

        store.ping().await?;
        info!("Connection established");

        let spinner = self.spinner(rows_read);
        let inserted = store.insert_many(records).await;
        if let Some(pb) = &spinner {
            pb.finish_and_clear();
        }
        let records_inserted = inserted?;
        info!("{} records inserted into collection", records_inserted);

        store.ensure_timestamp_index().await?;
        info!("Timestamp index ensured");

        Ok(LoadReport {
            input_path: self.config.input_path.clone(),
            rows_read,
            records_inserted,
            index_ensured: true,
            dry_run: false,
            elapsed: start_time.elapsed(),
        })
    }

    fn spinner(&self, rows: usize) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!("Inserting {} records", rows));
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    }
}
