//! Error handling for the records service.
//!
//! One error enum covers the loader and the API. Rejected query strings
//! answer 422. Everything else reaching a handler is a store fault: a
//! plain 500, never retried and never shaped like a structured failure.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Document store error: {0}")]
    Store(#[from] mongodb::error::Error),

    #[error("Document store unavailable: {reason}")]
    StoreUnavailable { reason: String },

    #[error("Input file not found: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Column '{column}' missing from input file: {path}")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Interrupted: {reason}")]
    Interrupted { reason: String },

    #[error("Invalid query parameters: {message}")]
    InvalidQuery { message: String },
}

pub type Result<T> = std::result::Result<T, RecordsError>;

impl RecordsError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a store-unavailable error
    pub fn store_unavailable(reason: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            reason: reason.into(),
        }
    }

    /// True for errors raised by (or on behalf of) the document store
    pub fn is_store_fault(&self) -> bool {
        matches!(self, Self::Store(_) | Self::StoreUnavailable { .. })
    }
}

impl IntoResponse for RecordsError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidQuery { message } => {
                tracing::debug!("Rejected query: {}", message);
                let body = Json(json!({ "detail": message }));
                (StatusCode::UNPROCESSABLE_ENTITY, body).into_response()
            }
            fault => {
                tracing::error!("Unhandled fault: {}", fault);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}
