//! API Module
//!
//! HTTP handlers and routing over the process-wide view cache.
//!
//! # Endpoints
//! - `GET /users/:id/profile` - Cached profile view
//! - `DELETE /cache` - Flush the whole cache
//! - `DELETE /cache/users/:id` - Invalidate one profile view
//! - `PUT /cache/capacity` - Change the capacity ceiling
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
