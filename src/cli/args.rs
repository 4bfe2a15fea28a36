//! Command-line argument definitions for the records service
//!
//! One binary, two subcommands: `serve` runs the HTTP API and `load`
//! imports a Parquet file. Every flag is optional and overrides the
//! matching `RECORDS_*` environment variable.

use crate::config::{LoaderConfig, ServerConfig, StoreConfig};
use crate::error::{RecordsError, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the records service
#[derive(Debug, Clone, Parser)]
#[command(
    name = "records-service",
    version,
    about = "Serve and load a time-indexed MongoDB records collection",
    long_about = "Read-only HTTP API over a MongoDB collection of timestamped records, \
                  plus a loader that bulk-imports a Parquet file into that collection \
                  and indexes it by timestamp."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Run the HTTP API
    Serve(ServeArgs),
    /// Bulk-import a Parquet file into the collection
    Load(LoadArgs),
}

/// Store selection shared by both subcommands
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct StoreArgs {
    /// MongoDB connection string
    #[arg(long = "mongo-uri", value_name = "URI")]
    pub mongo_uri: Option<String>,

    /// Database holding the collection
    #[arg(long = "database", value_name = "NAME")]
    pub database: Option<String>,

    /// Collection name
    #[arg(long = "collection", value_name = "NAME")]
    pub collection: Option<String>,
}

/// Logging flags shared by both subcommands
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct LogArgs {
    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

#[derive(Debug, Clone, Parser)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long = "host", value_name = "HOST")]
    pub host: Option<String>,

    /// Port to bind
    #[arg(short = 'p', long = "port", value_name = "PORT")]
    pub port: Option<u16>,

    #[command(flatten)]
    pub store: StoreArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, Parser)]
pub struct LoadArgs {
    /// Parquet file to import
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Read and convert the file without writing to the store
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    #[command(flatten)]
    pub store: StoreArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

impl Args {
    /// The chosen subcommand; `main` handles the missing case first
    pub fn get_command(&self) -> Result<Commands> {
        self.command
            .clone()
            .ok_or_else(|| RecordsError::configuration("No command given"))
    }
}

impl StoreArgs {
    /// Apply flags over an environment-derived config
    pub fn apply(&self, mut config: StoreConfig) -> StoreConfig {
        if let Some(uri) = &self.mongo_uri {
            config.uri = uri.clone();
        }
        if let Some(database) = &self.database {
            config.database = database.clone();
        }
        if let Some(collection) = &self.collection {
            config.collection = collection.clone();
        }
        config
    }
}

impl LogArgs {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }
}

impl ServeArgs {
    pub fn apply(&self, mut config: ServerConfig) -> ServerConfig {
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        config
    }
}

impl LoadArgs {
    pub fn apply(&self, mut config: LoaderConfig) -> LoaderConfig {
        if let Some(input) = &self.input {
            config.input_path = input.clone();
        }
        if self.dry_run {
            config.dry_run = true;
        }
        config
    }

    /// Spinners only when the user is watching
    pub fn show_progress(&self) -> bool {
        !self.log.quiet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let args = Args::parse_from([
            "records-service",
            "serve",
            "--port",
            "9000",
            "--collection",
            "telemetry",
            "-vv",
        ]);
        let Ok(Commands::Serve(serve)) = args.get_command() else {
            panic!("expected serve");
        };
        assert_eq!(serve.port, Some(9000));
        assert_eq!(serve.log.get_log_level(), "trace");

        let store = serve.store.apply(StoreConfig::default());
        assert_eq!(store.collection, "telemetry");
        assert_eq!(store.database, "ESA");

        let server = serve.apply(ServerConfig::default());
        assert_eq!(server.port, 9000);
        assert_eq!(server.host, "0.0.0.0");
    }

    #[test]
    fn test_parse_load() {
        let args = Args::parse_from([
            "records-service",
            "load",
            "--input",
            "data/results.parquet",
            "--dry-run",
            "--quiet",
        ]);
        let Ok(Commands::Load(load)) = args.get_command() else {
            panic!("expected load");
        };
        let config = load.apply(LoaderConfig::default());
        assert_eq!(config.input_path, PathBuf::from("data/results.parquet"));
        assert!(config.dry_run);
        assert!(!load.show_progress());
        assert_eq!(load.log.get_log_level(), "error");
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let parsed = Args::try_parse_from(["records-service", "load", "-q", "-v"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_no_command() {
        let args = Args::parse_from(["records-service"]);
        assert!(args.command.is_none());
        assert!(args.get_command().is_err());
    }
}
