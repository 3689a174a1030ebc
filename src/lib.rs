//! View Cache - process-local cache for derived view objects
//!
//! Memoizes expensive-to-assemble views (such as a user's public profile)
//! with TTL expiration, approximate-LRU eviction under capacity pressure and
//! a self-managing background sweeper.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;
pub mod views;

pub use api::AppState;
pub use cache::{CacheConfig, ViewCache};
pub use config::Config;
