//! Handler tests through axum extractors and `IntoResponse`

use super::seeded_store;
use crate::api::AppState;
use crate::api::handlers::{self, Params, RangeParams, SampleParams};
use crate::store::{MemoryStore, RecordStore};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use std::sync::Arc;

async fn state() -> AppState {
    AppState::new(seeded_store().await)
}

#[tokio::test]
async fn test_check_handler() {
    let body = handlers::check().await.0;
    assert_eq!(serde_json::to_value(body).unwrap(), json!({ "Connection": true }));
}

#[tokio::test]
async fn test_get_range_handler() {
    let params = RangeParams {
        start_time: "2024-05-01T00:00:00Z".to_string(),
        end_time: "2024-05-01T23:59:59Z".to_string(),
    };
    let body = handlers::get_range(State(state().await), Params(params))
        .await
        .unwrap()
        .0;

    let value = serde_json::to_value(body).unwrap();
    assert_eq!(value["success"], json!(true));
    assert_eq!(value["count"], json!(1));
    assert_eq!(value["data"][0]["sensor"], json!("a"));
    assert_eq!(value["data"][0]["value"], json!(10.0));
}

#[tokio::test]
async fn test_get_range_parse_error_is_ok_status() {
    let params = RangeParams {
        start_time: "soon".to_string(),
        end_time: "later".to_string(),
    };
    let response = handlers::get_range(State(state().await), Params(params))
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_get_example_handler() {
    let body = handlers::get_example(State(state().await), Params(SampleParams { lim: 2 }))
        .await
        .unwrap()
        .0;
    assert!(body.success);
    assert_eq!(body.data.len(), 2);
}

#[tokio::test]
async fn test_get_all_handler() {
    let body = handlers::get_all(State(state().await)).await.unwrap().0;
    assert_eq!(body.data.len(), 5);
}

#[tokio::test]
async fn test_store_fault_is_server_error() {
    let store = Arc::new(MemoryStore::new());
    store.close().await;
    let response = handlers::get_all(State(AppState::new(store)))
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
