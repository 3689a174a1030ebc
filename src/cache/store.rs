//! Cache Store Module
//!
//! Value table plus metadata index, guarded together by one exclusive lock.
//! Every public operation takes the lock for its whole duration, so the two
//! structures are only ever observed in agreement.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::{futures::Notified, Notify};
use tracing::debug;

use crate::cache::index::Access;
use crate::cache::{current_timestamp_ms, CacheConfig, CacheStats, CacheValue, EntryIndex};

// == Store State ==
/// Everything the lock protects.
#[derive(Debug)]
pub(super) struct StoreState {
    /// Key-value storage
    pub(super) values: HashMap<String, CacheValue>,
    /// Per-key metadata
    pub(super) index: EntryIndex,
    /// Capacity ceiling used by the pressure check
    pub(super) max_items: usize,
    /// Counters
    pub(super) stats: CacheStats,
}

impl StoreState {
    /// Live entry count; the value table and index always agree on it.
    pub(super) fn len(&self) -> usize {
        debug_assert_eq!(self.values.len(), self.index.len());
        self.values.len()
    }

    /// Removes one key from both structures. Returns whether it existed.
    pub(super) fn remove(&mut self, key: &str) -> bool {
        let had_value = self.values.remove(key).is_some();
        let had_entry = self.index.remove(key);
        debug_assert_eq!(had_value, had_entry);
        had_value || had_entry
    }

    pub(super) fn clear(&mut self) -> usize {
        let count = self.values.len();
        self.values.clear();
        self.index.reset();
        count
    }
}

// == Cache Store ==
/// Thread-safe cache storage with TTL metadata and pressure signalling.
///
/// Writes that push the store into the pressure band and reads that find an
/// expired entry raise a notification; the background sweeper picks those
/// up and does the actual eviction, so callers never wait on it.
#[derive(Debug)]
pub struct CacheStore {
    state: Mutex<StoreState>,
    /// TTL applied when a put does not carry one
    default_ttl: Duration,
    /// Raised when a write lands within 10% of the ceiling
    pressure: Notify,
    /// Raised when a read discovers an expired entry
    expired: Notify,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore with specified capacity and default TTL.
    ///
    /// # Arguments
    /// * `max_items` - Capacity ceiling for the pressure check
    /// * `default_ttl` - TTL for puts that do not specify one
    pub fn new(max_items: usize, default_ttl: Duration) -> Self {
        Self {
            state: Mutex::new(StoreState {
                values: HashMap::new(),
                index: EntryIndex::new(),
                max_items,
                stats: CacheStats::new(),
            }),
            default_ttl,
            pressure: Notify::new(),
            expired: Notify::new(),
        }
    }

    /// Creates a CacheStore from a [`CacheConfig`].
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.max_items, config.default_ttl)
    }

    pub(super) fn lock(&self) -> parking_lot::MutexGuard<'_, StoreState> {
        self.state.lock()
    }

    // == Put ==
    /// Inserts or overwrites a value.
    ///
    /// A new key gets `expire_at = now + ttl`. Overwriting an existing key,
    /// expired or not, only refreshes its access time; the expiry stays
    /// anchored to the first insertion, so an expired key keeps reading as a
    /// miss until a sweep removes it. When the write lands in the pressure
    /// band a reactive eviction is requested without waiting for it.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The shared payload
    /// * `ttl` - Optional TTL (uses the store default if None)
    pub fn put(&self, key: impl Into<String>, value: CacheValue, ttl: Option<Duration>) {
        let key = key.into();
        let ttl = ttl.unwrap_or(self.default_ttl);
        let now = current_timestamp_ms();

        let under_pressure = {
            let mut state = self.lock();
            state.index.upsert(&key, now, Some(ttl));
            state.values.insert(key, value);
            state.under_pressure()
        };

        if under_pressure {
            self.pressure.notify_one();
        }
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Live entries have their access time refreshed. An expired entry reads
    /// as a miss and an expiry sweep is requested to remove it.
    pub fn get(&self, key: &str) -> Option<CacheValue> {
        let now = current_timestamp_ms();
        let mut state = self.lock();

        match state.index.access(key, now) {
            Access::Live => {
                let value = state.values.get(key).cloned();
                debug_assert!(value.is_some(), "index entry without value for {key}");
                state.stats.record_hit();
                value
            }
            Access::Expired => {
                state.stats.record_expired();
                drop(state);
                self.expired.notify_one();
                None
            }
            Access::Absent => {
                state.stats.record_miss();
                None
            }
        }
    }

    // == Delete ==
    /// Removes each given key. Missing keys are ignored.
    ///
    /// Returns the number of entries actually removed.
    pub fn delete<I, K>(&self, keys: I) -> usize
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let mut state = self.lock();
        let removed = keys
            .into_iter()
            .filter(|key| state.remove(key.as_ref()))
            .count();
        debug!("Deleted {} cache entries", removed);
        removed
    }

    // == Reset ==
    /// Clears the whole cache. Returns how many entries were dropped.
    pub fn reset(&self) -> usize {
        let cleared = self.lock().clear();
        debug!("Cache reset, {} entries flushed", cleared);
        cleared
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks whether `key` currently has an entry, expired or not.
    pub fn contains(&self, key: &str) -> bool {
        self.lock().values.contains_key(key)
    }

    // == Max Items ==
    /// Returns the current capacity ceiling.
    pub fn max_items(&self) -> usize {
        self.lock().max_items
    }

    /// Changes the capacity ceiling and runs the pressure check against it.
    pub fn set_max_items(&self, max_items: usize) {
        let under_pressure = {
            let mut state = self.lock();
            state.max_items = max_items;
            state.under_pressure()
        };

        if under_pressure {
            self.pressure.notify_one();
        }
    }

    /// Returns the TTL used for puts without one.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    // == Stats ==
    /// Returns a snapshot of the cache statistics.
    pub fn stats(&self) -> CacheStats {
        let state = self.lock();
        let mut stats = state.stats.clone();
        stats.total_entries = state.len();
        stats.max_items = state.max_items;
        stats
    }

    /// True when the value table and index describe exactly the same keys.
    pub fn is_consistent(&self) -> bool {
        let state = self.lock();
        state.values.len() == state.index.len()
            && state.index.iter().all(|entry| state.values.contains_key(&entry.key))
    }

    pub(crate) fn pressure_notified(&self) -> Notified<'_> {
        self.pressure.notified()
    }

    pub(crate) fn expiry_notified(&self) -> Notified<'_> {
        self.expired.notified()
    }
}
