//! MongoDB-backed record store.

use super::RecordStore;
use crate::config::StoreConfig;
use crate::constants::TIMESTAMP_FIELD;
use crate::error::Result;
use crate::models::{Record, TimeRange};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::{Client, Collection, IndexModel};
use tracing::{debug, info};

/// One client for the whole process; the driver pools connections itself
#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    collection: Collection<Record>,
}

impl MongoStore {
    /// Build a client for `config`. The driver connects lazily, so this
    /// succeeds even when the server is down.
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::with_uri_str(&config.uri).await?;
        let collection = client
            .database(&config.database)
            .collection::<Record>(&config.collection);

        info!(
            "Store handle created for {}.{}",
            config.database, config.collection
        );

        Ok(Self { client, collection })
    }

    pub fn collection_name(&self) -> &str {
        self.collection.name()
    }
}

#[async_trait]
impl RecordStore for MongoStore {
    async fn find_in_range(&self, range: &TimeRange) -> Result<Vec<Record>> {
        let (start, end) = range.bson_bounds();
        let filter = doc! { TIMESTAMP_FIELD: { "$gte": start, "$lte": end } };
        debug!("find {:?}", filter);

        let cursor = self
            .collection
            .find(filter)
            .sort(doc! { TIMESTAMP_FIELD: 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_sample(&self, limit: i64) -> Result<Vec<Record>> {
        let cursor = self.collection.find(doc! {}).limit(limit).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_all_sorted(&self) -> Result<Vec<Record>> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { TIMESTAMP_FIELD: 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert_many(&self, records: Vec<Record>) -> Result<usize> {
        if records.is_empty() {
            // The driver rejects an empty batch
            return Ok(0);
        }
        let result = self.collection.insert_many(records).await?;
        Ok(result.inserted_ids.len())
    }

    async fn ensure_timestamp_index(&self) -> Result<()> {
        let index = IndexModel::builder()
            .keys(doc! { TIMESTAMP_FIELD: 1 })
            .build();
        let created = self.collection.create_index(index).await?;
        debug!("Index ready: {}", created.index_name);
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }

    async fn close(&self) {
        self.client.clone().shutdown().await;
        info!("Store connection closed");
    }
}
