//! Eviction Module
//!
//! The two ways the store shrinks:
//! - Reactive pressure eviction: when the store is within 10% of its ceiling,
//!   rank a snapshot of the index by approximate recency and keep half.
//! - Expiry sweep: remove exactly the entries whose TTL has elapsed.
//!
//! Both run under the store lock, so a concurrent reader sees an entry either
//! fully present or fully gone.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::cache::store::StoreState;
use crate::cache::{current_timestamp_ms, CacheStore};

impl StoreState {
    // == Pressure Check ==
    /// True when `len + max_items / 10 > max_items`.
    pub(super) fn under_pressure(&self) -> bool {
        self.len() + self.max_items / 10 > self.max_items
    }

    // == Shrink ==
    /// Keeps at most `keep` entries, dropping the most evictable ones first.
    ///
    /// Returns the number of entries dropped.
    pub(super) fn shrink_to(&mut self, keep: usize) -> usize {
        let total = self.index.len();
        if keep >= total {
            return 0;
        }

        let ranked = self.index.ranked_for_eviction();
        let doomed: HashSet<String> = ranked
            .into_iter()
            .take(total - keep)
            .map(|entry| entry.key)
            .collect();

        for key in &doomed {
            self.values.remove(key);
        }
        self.index.remove_many(&doomed);
        self.stats.record_evictions(doomed.len());

        doomed.len()
    }

    // == Remove Expired ==
    /// Drops every entry expired at `now`. Returns the removed keys.
    pub(super) fn remove_expired(&mut self, now: u64) -> Vec<String> {
        let expired = self.index.expired_keys(now);
        for key in &expired {
            self.remove(key);
        }
        self.stats.record_swept(expired.len());
        expired
    }
}

impl CacheStore {
    // == Relieve Pressure ==
    /// Halves the store by approximate recency until it is out of the
    /// pressure band.
    ///
    /// The threshold is re-checked under the lock, so a request that arrives
    /// after another pass already made room does nothing.
    ///
    /// Returns the number of entries evicted.
    pub fn relieve_pressure(&self) -> usize {
        let mut state = self.lock();
        let before = state.len();
        let mut evicted = 0;

        while state.under_pressure() && state.len() > 0 {
            let keep = state.len() / 2;
            evicted += state.shrink_to(keep);
        }

        if evicted > 0 {
            info!(
                "Pressure eviction: {} -> {} entries (max_items={})",
                before,
                state.len(),
                state.max_items
            );
        } else {
            debug!("Pressure eviction: nothing to do at {} entries", before);
        }
        evicted
    }

    // == Evict To ==
    /// Runs one approximate-recency shrink with an explicit target size.
    ///
    /// Returns the number of entries evicted.
    pub fn evict_to(&self, keep: usize) -> usize {
        let evicted = self.lock().shrink_to(keep);
        debug!("Evicted {} entries down to at most {}", evicted, keep);
        evicted
    }

    // == Sweep Expired ==
    /// Removes exactly the entries whose TTL has elapsed.
    ///
    /// Returns the number of entries removed.
    pub fn sweep_expired(&self) -> usize {
        let removed = self.lock().remove_expired(current_timestamp_ms());

        if removed.is_empty() {
            debug!("Expiry sweep: no expired entries found");
        } else {
            info!("Expiry sweep: removed {} expired entries", removed.len());
            debug!("Expired keys: {:?}", removed);
        }
        removed.len()
    }
}
