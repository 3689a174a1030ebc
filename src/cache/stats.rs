//! Cache Statistics Module
//!
//! Tracks read outcomes and how many entries each eviction strategy removed.

use serde::Serialize;

// == Cache Stats ==
/// Cache counters, maintained under the store lock.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Reads that returned a live value
    pub hits: u64,
    /// Reads that found nothing usable (absent or expired)
    pub misses: u64,
    /// Misses caused by an elapsed TTL discovered on read
    pub expired: u64,
    /// Entries dropped by reactive pressure eviction
    pub evictions: u64,
    /// Entries dropped by expiry sweeps
    pub swept: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
    /// Current capacity ceiling
    pub max_items: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Counts a read that hit an expired entry. Also counts as a miss.
    pub fn record_expired(&mut self) {
        self.expired += 1;
        self.misses += 1;
    }

    pub fn record_evictions(&mut self, count: usize) {
        self.evictions += count as u64;
    }

    pub fn record_swept(&mut self, count: usize) {
        self.swept += count as u64;
    }
}
