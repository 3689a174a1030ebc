//! Entry Index Module
//!
//! Ordered collection of [`CacheEntry`] metadata, decoupled from the cached
//! values. Insertion order is preserved; recency ranking is computed on a
//! snapshot when eviction needs it.

use std::collections::HashSet;
use std::time::Duration;

use crate::cache::CacheEntry;

// == Access Result ==
/// Outcome of looking a key up for a read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Entry is live and its access time was refreshed
    Live,
    /// Entry exists but its TTL has elapsed
    Expired,
    /// No entry for the key
    Absent,
}

// == Entry Index ==
/// Metadata index with one record per live cache key.
#[derive(Debug, Default)]
pub struct EntryIndex {
    /// Records in insertion order
    entries: Vec<CacheEntry>,
}

impl EntryIndex {
    // == Constructor ==
    /// Creates a new empty index.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.key == key)
    }

    // == Get ==
    /// Returns the record for `key`, if tracked.
    pub fn get(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    // == Upsert ==
    /// Records a write of `key` at `now`.
    ///
    /// A new key gets a fresh record. An existing key, live or already
    /// expired, only has its access time refreshed, so its expiry stays
    /// anchored to first insertion until a sweep removes it.
    ///
    /// Returns `true` when a new record was created.
    pub fn upsert(&mut self, key: &str, now: u64, ttl: Option<Duration>) -> bool {
        match self.position(key) {
            Some(pos) => {
                self.entries[pos].touch(now);
                false
            }
            None => {
                self.entries.push(CacheEntry::new(key, now, ttl));
                true
            }
        }
    }

    // == Access ==
    /// Looks `key` up for a read at `now`, refreshing it when live.
    pub fn access(&mut self, key: &str, now: u64) -> Access {
        match self.position(key) {
            Some(pos) if self.entries[pos].is_expired_at(now) => Access::Expired,
            Some(pos) => {
                self.entries[pos].touch(now);
                Access::Live
            }
            None => Access::Absent,
        }
    }

    // == Remove ==
    /// Removes the record for `key`. Returns whether one was present.
    pub fn remove(&mut self, key: &str) -> bool {
        match self.position(key) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    // == Remove Many ==
    /// Removes every record whose key is in `keys` in a single pass.
    pub fn remove_many(&mut self, keys: &HashSet<String>) {
        self.entries.retain(|entry| !keys.contains(&entry.key));
    }

    // == Reset ==
    /// Drops every record.
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    // == Expired Keys ==
    /// Keys whose TTL has elapsed at `now`.
    pub fn expired_keys(&self, now: u64) -> Vec<String> {
        self.entries
            .iter()
            .filter(|entry| entry.is_expired_at(now))
            .map(|entry| entry.key.clone())
            .collect()
    }

    // == Ranked Snapshot ==
    /// Copy of the index sorted by [`CacheEntry::eviction_order`], most
    /// evictable first.
    pub fn ranked_for_eviction(&self) -> Vec<CacheEntry> {
        let mut snapshot = self.entries.clone();
        snapshot.sort_by(CacheEntry::eviction_order);
        snapshot
    }

    /// Iterates records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CacheEntry> {
        self.entries.iter()
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Contains ==
    /// Checks if a key is being tracked.
    pub fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }
}
