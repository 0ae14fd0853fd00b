//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::api::error::{ApiError, ApiResult};
use crate::cache::{Cache, SyncCache};
use crate::config::Config;
use crate::error::Result;
use crate::models::{
    ContainsResponse, DeleteResponse, GetResponse, HealthResponse, InfoResponse, KeysResponse,
    SetRequest, SetResponse,
};

/// Application state shared across all handlers.
///
/// The cache serializes its own operations, so handlers share it through a
/// plain `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache
    pub cache: Arc<SyncCache<String, String>>,
}

impl AppState {
    /// Creates a new AppState around the given cache.
    pub fn new(cache: SyncCache<String, String>) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// # Errors
    /// Fails when the configured settings are rejected by the cache.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = Cache::builder()
            .settings(config.cache_settings())
            .promotion(config.promotion.to_promotion())
            .build_sync()?;
        Ok(Self::new(cache))
    }
}

/// Handler for PUT /set
///
/// Stores a key-value pair in the cache.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> ApiResult<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    state.cache.set(req.key.clone(), req.value);

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /get/:key
///
/// Retrieves a value from the cache by key.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ApiResult<Json<GetResponse>> {
    let value = state.cache.get(&key)?;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for DELETE /del/:key
///
/// Deletes a key from the cache.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    state.cache.delete(&key)?;

    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for GET /contains/:key
pub async fn contains_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<ContainsResponse> {
    let present = state.cache.contains(&key);

    Json(ContainsResponse::new(key, present))
}

/// Handler for GET /keys
///
/// Lists keys oldest to newest as of the request.
pub async fn keys_handler(State(state): State<AppState>) -> Json<KeysResponse> {
    let keys = state.cache.keys().iter().cloned().collect();

    Json(KeysResponse { keys })
}

/// Handler for GET /info
///
/// Reads length and settings under a single lock acquisition.
pub async fn info_handler(State(state): State<AppState>) -> Json<InfoResponse> {
    let info = state.cache.with_lock(|cache| InfoResponse {
        len: cache.len(),
        capacity: cache.capacity(),
        ttl_secs: cache.ttl().map(|ttl| ttl.as_secs_f64()),
    });

    Json(info)
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
