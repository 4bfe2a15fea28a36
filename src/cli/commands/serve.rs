//! `serve`: run the HTTP API until Ctrl-C.

use super::shared::{load_store_config, setup_logging};
use crate::api::{self, AppState};
use crate::cli::args::ServeArgs;
use crate::config::ServerConfig;
use crate::error::Result;
use crate::store::MongoStore;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

pub async fn run_serve(args: ServeArgs) -> Result<()> {
    setup_logging(&args.log);
    debug!("Command line arguments: {:?}", args);

    let store_config = load_store_config(&args.store)?;
    let server_config = args.apply(ServerConfig::from_env()?);
    let bind_addr = server_config.bind_address()?;

    // One handle for the life of the process
    let store = MongoStore::connect(&store_config).await?;
    let collection = store.collection_name().to_string();
    let state = AppState::new(Arc::new(store));

    let listener = TcpListener::bind(bind_addr).await?;
    info!(
        "Starting records API on {} over collection '{}'",
        bind_addr, collection
    );

    api::serve(listener, state, shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Received Ctrl-C, shutting down");
}
