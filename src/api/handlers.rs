//! API Handlers
//!
//! HTTP request handlers for each endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::ViewCache;
use crate::error::{ApiError, Result};
use crate::models::{
    CapacityRequest, CapacityResponse, FlushResponse, HealthResponse, InvalidateResponse,
    ProfileResponse, StatsResponse,
};
use crate::views::{ProfileViews, UserDirectory};

/// Application state shared across all handlers.
///
/// Holds the process-wide view cache and the profile reader built on it.
#[derive(Clone)]
pub struct AppState {
    /// Process-wide view cache
    pub cache: Arc<ViewCache>,
    /// Cache-aside profile reader
    pub profiles: ProfileViews,
}

impl AppState {
    /// Creates a new AppState around an existing cache.
    pub fn new(cache: Arc<ViewCache>, directory: Arc<dyn UserDirectory>) -> Self {
        let profiles = ProfileViews::new(cache.clone(), directory);
        Self { cache, profiles }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Starts the view cache, so it must be called inside a Tokio runtime.
    pub fn from_config(config: &crate::config::Config, directory: Arc<dyn UserDirectory>) -> Self {
        let cache = Arc::new(ViewCache::new(config.cache_config()));
        Self::new(cache, directory)
    }
}

/// Handler for GET /users/:id/profile
///
/// Returns the user's profile view, from the cache when possible.
pub async fn profile_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ProfileResponse>> {
    let lookup = state
        .profiles
        .base_user(&user_id)
        .ok_or_else(|| ApiError::NotFound(format!("user '{}'", user_id)))?;

    Ok(Json(lookup.into()))
}

/// Handler for DELETE /cache/users/:id
///
/// Drops the cached profile view of one user.
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<InvalidateResponse> {
    let removed = state.profiles.invalidate(&user_id);
    Json(InvalidateResponse::new(user_id, removed))
}

/// Handler for DELETE /cache
///
/// Flushes the whole cache.
pub async fn flush_handler(State(state): State<AppState>) -> Json<FlushResponse> {
    let flushed = state.cache.reset();
    Json(FlushResponse::new(flushed))
}

/// Handler for PUT /cache/capacity
///
/// Changes the capacity ceiling; a lower ceiling may trigger eviction.
pub async fn capacity_handler(
    State(state): State<AppState>,
    Json(req): Json<CapacityRequest>,
) -> Result<Json<CapacityResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    state.cache.set_max_items(req.max_items);

    Ok(Json(CapacityResponse {
        max_items: state.cache.max_items(),
        total_entries: state.cache.len(),
    }))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.cache.stats().into())
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
