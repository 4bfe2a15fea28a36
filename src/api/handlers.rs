//! Axum handlers for the four read endpoints.

use super::AppState;
use super::query;
use super::responses::{CheckResponse, ListResponse, RangeResponse};
use crate::error::{RecordsError, Result};
use axum::{
    Json,
    extract::{FromRequestParts, Query, State},
    http::request::Parts,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Query-string extractor whose rejection is a 422 `InvalidQuery`
#[derive(Debug, Clone)]
pub struct Params<T>(pub T);

impl<T, S> FromRequestParts<S> for Params<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = RecordsError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(params)| Params(params))
            .map_err(|rejection| RecordsError::InvalidQuery {
                message: rejection.body_text(),
            })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RangeParams {
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SampleParams {
    pub lim: i64,
}

pub async fn check() -> Json<CheckResponse> {
    Json(query::liveness())
}

pub async fn get_range(
    State(state): State<AppState>,
    Params(params): Params<RangeParams>,
) -> Result<Json<RangeResponse>> {
    let response =
        query::range_query(state.store.as_ref(), &params.start_time, &params.end_time).await?;
    Ok(Json(response))
}

pub async fn get_example(
    State(state): State<AppState>,
    Params(params): Params<SampleParams>,
) -> Result<Json<ListResponse>> {
    let response = query::sample_query(state.store.as_ref(), params.lim).await?;
    Ok(Json(response))
}

pub async fn get_all(State(state): State<AppState>) -> Result<Json<ListResponse>> {
    let response = query::full_query(state.store.as_ref()).await?;
    Ok(Json(response))
}
