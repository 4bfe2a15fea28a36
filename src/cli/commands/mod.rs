//! Command implementations for the records service CLI
//!
//! - `serve`: long-running HTTP API
//! - `load`: one-shot Parquet import

pub mod load;
pub mod serve;
pub mod shared;

use crate::cli::args::{Args, Commands};
use crate::error::Result;

/// Dispatch to the selected subcommand
pub async fn run(args: Args) -> Result<()> {
    match args.get_command()? {
        Commands::Serve(serve_args) => serve::run_serve(serve_args).await,
        Commands::Load(load_args) => load::run_load(load_args).await.map(|_| ()),
    }
}
