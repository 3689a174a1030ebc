//! Cache Entry Module
//!
//! Lightweight metadata record kept for every live cache key. The value
//! itself lives in the store's value table; this record only carries the
//! timestamps the eviction strategies rank and expire by.

use std::cmp::Ordering;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// Metadata for a single cached key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// The cache key this record describes
    pub key: String,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds), None = never expires
    pub expire_at: Option<u64>,
    /// Last successful read or overwrite (Unix milliseconds)
    pub last_access_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a record first seen at `now`.
    ///
    /// # Arguments
    /// * `key` - The key being tracked
    /// * `now` - Insertion time in Unix milliseconds
    /// * `ttl` - Optional time-to-live; `None` never expires
    pub fn new(key: impl Into<String>, now: u64, ttl: Option<Duration>) -> Self {
        let expire_at = ttl.map(|ttl| {
            let ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
            now.saturating_add(ttl_ms)
        });

        Self {
            key: key.into(),
            created_at: now,
            expire_at,
            last_access_at: now,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry has expired at `now`.
    ///
    /// An entry is expired once `now >= expire_at`; the TTL boundary itself
    /// already counts as expired.
    pub fn is_expired_at(&self, now: u64) -> bool {
        match self.expire_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }

    // == Touch ==
    /// Refreshes the last-access time. Never moves it before `created_at`.
    pub fn touch(&mut self, now: u64) {
        self.last_access_at = now.max(self.created_at);
    }

    // == Access Gap ==
    /// Time between creation and the latest access, in milliseconds.
    ///
    /// A small gap means the entry was created recently relative to its last
    /// use, or was never read again after insertion.
    pub fn access_gap(&self) -> u64 {
        self.last_access_at.saturating_sub(self.created_at)
    }

    // == Eviction Order ==
    /// Approximate-recency ordering, most evictable first.
    ///
    /// Smaller access gap sorts first; equal gaps put the older entry first.
    pub fn eviction_order(a: &CacheEntry, b: &CacheEntry) -> Ordering {
        a.access_gap()
            .cmp(&b.access_gap())
            .then_with(|| a.created_at.cmp(&b.created_at))
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
///
/// A clock set before the epoch reads as 0 rather than panicking.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation_with_ttl() {
        let entry = CacheEntry::new("k", 1_000, Some(Duration::from_secs(2)));

        assert_eq!(entry.key, "k");
        assert_eq!(entry.created_at, 1_000);
        assert_eq!(entry.last_access_at, 1_000);
        assert_eq!(entry.expire_at, Some(3_000));
    }

    #[test]
    fn test_entry_without_ttl_never_expires() {
        let entry = CacheEntry::new("k", 1_000, None);

        assert!(entry.expire_at.is_none());
        assert!(!entry.is_expired_at(u64::MAX));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = CacheEntry::new("k", 1_000, Some(Duration::from_millis(500)));

        assert!(!entry.is_expired_at(1_499));
        assert!(entry.is_expired_at(1_500), "Entry should be expired at boundary");
        assert!(entry.is_expired_at(2_000));
    }

    #[test]
    fn test_huge_ttl_saturates() {
        let entry = CacheEntry::new("k", 1_000, Some(Duration::MAX));
        assert_eq!(entry.expire_at, Some(u64::MAX));
    }

    #[test]
    fn test_touch_refreshes_last_access() {
        let mut entry = CacheEntry::new("k", 1_000, None);
        entry.touch(1_750);

        assert_eq!(entry.last_access_at, 1_750);
        assert_eq!(entry.access_gap(), 750);
    }

    #[test]
    fn test_touch_never_precedes_creation() {
        let mut entry = CacheEntry::new("k", 1_000, None);
        entry.touch(10);

        assert_eq!(entry.last_access_at, 1_000);
        assert!(entry.created_at <= entry.last_access_at);
    }

    #[test]
    fn test_eviction_order_by_gap() {
        let mut reused = CacheEntry::new("reused", 1_000, None);
        reused.touch(5_000);
        let idle = CacheEntry::new("idle", 4_000, None);

        assert_eq!(CacheEntry::eviction_order(&idle, &reused), Ordering::Less);
        assert_eq!(CacheEntry::eviction_order(&reused, &idle), Ordering::Greater);
    }

    #[test]
    fn test_eviction_order_tie_breaks_on_age() {
        let older = CacheEntry::new("older", 1_000, None);
        let newer = CacheEntry::new("newer", 2_000, None);

        assert_eq!(CacheEntry::eviction_order(&older, &newer), Ordering::Less);
    }
}
