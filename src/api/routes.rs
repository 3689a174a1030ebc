//! API Routes
//!
//! Configures the Axum router with all endpoints.

use axum::{
    routing::{delete, get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    capacity_handler, flush_handler, health_handler, invalidate_handler, profile_handler,
    stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /users/:id/profile` - Cached profile view
/// - `DELETE /cache` - Flush the whole cache
/// - `DELETE /cache/users/:id` - Invalidate one profile view
/// - `PUT /cache/capacity` - Change the capacity ceiling
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/users/:id/profile", get(profile_handler))
        .route("/cache", delete(flush_handler))
        .route("/cache/users/:id", delete(invalidate_handler))
        .route("/cache/capacity", put(capacity_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
