//! Response DTOs for the HTTP API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::views::{BaseUser, ProfileLookup};

/// Response body for GET /users/:id/profile
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    /// The profile view
    pub user: BaseUser,
    /// Whether the view was served from the cache
    pub cached: bool,
}

impl From<ProfileLookup> for ProfileResponse {
    fn from(lookup: ProfileLookup) -> Self {
        Self {
            user: (*lookup.user).clone(),
            cached: lookup.cached,
        }
    }
}

/// Response body for DELETE /cache
#[derive(Debug, Clone, Serialize)]
pub struct FlushResponse {
    /// Success message
    pub message: String,
    /// Number of entries dropped
    pub flushed: usize,
}

impl FlushResponse {
    pub fn new(flushed: usize) -> Self {
        Self {
            message: format!("Flushed {} cache entries", flushed),
            flushed,
        }
    }
}

/// Response body for DELETE /cache/users/:id
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    /// Success message
    pub message: String,
    /// The user whose view was targeted
    pub user_id: String,
    /// Whether a cached view existed
    pub removed: bool,
}

impl InvalidateResponse {
    pub fn new(user_id: impl Into<String>, removed: bool) -> Self {
        let user_id = user_id.into();
        let message = if removed {
            format!("Profile view of '{}' invalidated", user_id)
        } else {
            format!("No cached profile view for '{}'", user_id)
        };
        Self {
            message,
            user_id,
            removed,
        }
    }
}

/// Response body for PUT /cache/capacity
#[derive(Debug, Clone, Serialize)]
pub struct CapacityResponse {
    /// Capacity ceiling now in effect
    pub max_items: usize,
    /// Entry count when the change was applied
    pub total_entries: usize,
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: CacheStats,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        let hit_rate = stats.hit_rate();
        Self { stats, hit_rate }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
