//! Configuration management and validation.
//!
//! Settings are layered: built-in defaults, then `RECORDS_*` environment
//! variables, then CLI flags (applied by the command layer).

use crate::constants::{
    DEFAULT_COLLECTION, DEFAULT_DATABASE, DEFAULT_HOST, DEFAULT_INPUT_FILE, DEFAULT_MONGO_URI,
    DEFAULT_PORT, MONGO_URI_SCHEMES, env_vars,
};
use crate::error::{RecordsError, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::debug;

/// Where the records live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// MongoDB connection string
    pub uri: String,

    /// Database name
    pub database: String,

    /// Collection name shared by the loader and the API
    pub collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            uri: DEFAULT_MONGO_URI.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }
}

impl StoreConfig {
    /// Defaults overlaid with the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with whatever `lookup` returns for each variable
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(uri) = lookup(env_vars::MONGO_URI) {
            config.uri = uri;
        }
        if let Some(database) = lookup(env_vars::DATABASE) {
            config.database = database;
        }
        if let Some(collection) = lookup(env_vars::COLLECTION) {
            config.collection = collection;
        }
        debug!(
            "Store config: database={}, collection={}",
            config.database, config.collection
        );
        config
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = uri.into();
        self
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Reject settings the driver would only fail on later
    pub fn validate(&self) -> Result<()> {
        if self.uri.trim().is_empty() {
            return Err(RecordsError::configuration("MongoDB URI cannot be empty"));
        }

        if !MONGO_URI_SCHEMES
            .iter()
            .any(|scheme| self.uri.starts_with(scheme))
        {
            return Err(RecordsError::configuration(format!(
                "MongoDB URI must start with one of {}: {}",
                MONGO_URI_SCHEMES.join(", "),
                self.uri
            )));
        }

        if self.database.trim().is_empty() {
            return Err(RecordsError::configuration("Database name cannot be empty"));
        }

        if self.collection.trim().is_empty() {
            return Err(RecordsError::configuration(
                "Collection name cannot be empty",
            ));
        }

        Ok(())
    }
}

/// HTTP listener settings for the API service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(host) = lookup(env_vars::HOST) {
            config.host = host;
        }
        if let Some(port) = lookup(env_vars::PORT) {
            config.port = port.parse().map_err(|_| {
                RecordsError::configuration(format!(
                    "{} must be a valid port number: {}",
                    env_vars::PORT,
                    port
                ))
            })?;
        }
        Ok(config)
    }

    /// Socket address to bind
    pub fn bind_address(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| {
                RecordsError::configuration(format!(
                    "Invalid bind address: {}:{}",
                    self.host, self.port
                ))
            })
    }
}

/// Settings for one loader run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Parquet file to import
    pub input_path: PathBuf,

    /// Read and convert only, never touch the store
    pub dry_run: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_FILE),
            dry_run: false,
        }
    }
}

impl LoaderConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(input) = lookup(env_vars::INPUT) {
            config.input_path = PathBuf::from(input);
        }
        config
    }

    pub fn with_input_path(mut self, input_path: impl Into<PathBuf>) -> Self {
        self.input_path = input_path.into();
        self
    }

    pub fn with_dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.input_path.exists() {
            return Err(RecordsError::InputNotFound {
                path: self.input_path.clone(),
            });
        }
        Ok(())
    }
}
