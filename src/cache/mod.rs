//! Cache Module
//!
//! Process-local cache for derived view objects, with TTL expiration,
//! approximate-LRU eviction under capacity pressure and a background sweeper.

mod entry;
mod eviction;
mod index;
mod key;
mod lifecycle;
mod stats;
mod store;


use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use index::{Access, EntryIndex};
pub use key::{derive_key, KEY_DELIMITER};
pub use lifecycle::ViewCache;
pub use stats::CacheStats;
pub use store::CacheStore;

/// Opaque cached payload. Consumers downcast to the type they stored.
pub type CacheValue = Arc<dyn Any + Send + Sync>;

// == Public Constants ==
/// Default capacity ceiling
pub const DEFAULT_MAX_ITEMS: usize = 100;

/// Default time-to-live for entries stored without one
pub const DEFAULT_TTL: Duration = Duration::from_secs(180);

/// Default interval between expiry sweeps
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(180);

// == Cache Config ==
/// Construction-time settings for a [`ViewCache`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Capacity ceiling for reactive eviction
    pub max_items: usize,
    /// TTL applied when a put does not specify one
    pub default_ttl: Duration,
    /// Period of the background expiry sweep
    pub sweep_interval: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
            default_ttl: DEFAULT_TTL,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
        }
    }
}
