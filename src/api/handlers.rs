//! API Handlers
//!
//! HTTP request handlers for each cache endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::TtlCache;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    AppendRequest, AppendResponse, CountResponse, DeleteResponse, DumpResponse, GetResponse,
    HealthResponse, SetRequest, SetResponse, StatsResponse,
};

/// Application state shared across all handlers.
///
/// The cache synchronizes itself, so handlers share it through a plain `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Shared TTL cache
    pub cache: Arc<TtlCache<String>>,
}

impl AppState {
    /// Creates a new AppState around an existing cache.
    pub fn new(cache: TtlCache<String>) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Starts the cache's sweeper, so this must run inside a Tokio runtime.
    pub fn from_config(config: &Config) -> Self {
        Self::new(TtlCache::new(config.ttl()))
    }
}

/// Handler for PUT /set
///
/// Stores a value under a key, replacing any previous value or sequence.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    state.cache.set(req.key.clone(), req.value).await;

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /get/:key
///
/// Retrieves the payload under a key and extends its life.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    match state.cache.get(&key).await {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for DELETE /del/:key
///
/// Deleting a missing key succeeds; `existed` tells the two cases apart.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<DeleteResponse> {
    let existed = state.cache.delete(&key).await;

    Json(DeleteResponse::new(key, existed))
}

/// Handler for POST /append
///
/// Appends a value to the sequence under a key.
pub async fn append_handler(
    State(state): State<AppState>,
    Json(req): Json<AppendRequest>,
) -> Result<Json<AppendResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let length = state.cache.add_to_slice(req.key.clone(), req.value).await?;

    Ok(Json(AppendResponse::new(req.key, length)))
}

/// Handler for GET /count
pub async fn count_handler(State(state): State<AppState>) -> Json<CountResponse> {
    let count = state.cache.count().await;
    Json(CountResponse { count })
}

/// Handler for POST /dump
///
/// Writes every entry to the server log.
pub async fn dump_handler(State(state): State<AppState>) -> Json<DumpResponse> {
    let entries = state.cache.dump().await;
    Json(DumpResponse::new(entries))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.stats().await;
    Json(StatsResponse::from(stats))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
