//! HTTP API over the records collection.
//!
//! Four read-only endpoints share one store handle held in `AppState`:
//! - `GET /check`: liveness, never touches the store
//! - `GET /get`: inclusive time-range query, sorted by timestamp
//! - `GET /getexample`: bounded sample in natural order
//! - `GET /getall`: whole collection, sorted by timestamp

pub mod handlers;
pub mod query;
pub mod responses;

pub use responses::{CheckResponse, ListResponse, QueryFailure, RangeResponse};

use crate::error::Result;
use crate::store::RecordStore;
use axum::{Router, routing::get};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}

/// Create the router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/check", get(handlers::check))
        .route("/get", get(handlers::get_range))
        .route("/getexample", get(handlers::get_example))
        .route("/getall", get(handlers::get_all))
        .with_state(state)
}

/// Serve until `shutdown` resolves, then close the store handle
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let store = Arc::clone(&state.store);
    let app = create_router(state);

    info!("API listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    store.close().await;
    info!("API stopped");
    Ok(())
}

#[cfg(test)]
mod tests;
