//! End-to-end behaviour of a managed ViewCache: reactive eviction, timed
//! expiry, capacity recovery under concurrent writers and shutdown flush.

use std::sync::Arc;
use std::time::Duration;

use view_cache::{cache_key, CacheConfig, ViewCache};

fn config(max_items: usize, sweep_interval: Duration) -> CacheConfig {
    CacheConfig {
        max_items,
        default_ttl: Duration::from_secs(300),
        sweep_interval,
    }
}

#[tokio::test]
async fn test_pressure_eviction_halves_store() {
    let cache = ViewCache::new(config(100, Duration::from_secs(300)));

    for i in 0..95 {
        cache.put(format!("key{i}"), format!("value{i}"), None);
    }
    assert_eq!(cache.len(), 95);

    for i in 95..105 {
        cache.put(format!("key{i}"), format!("value{i}"), None);
    }

    tokio::time::sleep(Duration::from_millis(50)).await;

    let len = cache.len();
    assert!((48..=58).contains(&len), "len {} outside expected range", len);
    assert!(cache.stats().evictions > 0);

    cache.shutdown().await;
}

#[tokio::test]
async fn test_timer_sweep_removes_expired_entry() {
    let cache = ViewCache::new(config(100, Duration::from_millis(200)));

    cache.put("k1", "v1", Some(Duration::from_secs(1)));
    cache.put("k2", "v2", None);
    assert_eq!(cache.len(), 2);

    tokio::time::sleep(Duration::from_millis(1500)).await;

    assert_eq!(cache.len(), 1);
    assert!(cache.get("k1").is_none());
    assert!(cache.stats().swept >= 1);

    cache.shutdown().await;
}

#[tokio::test]
async fn test_manual_sweep_after_ttl() {
    let cache = ViewCache::new(config(100, Duration::from_secs(300)));

    cache.put("k1", "v1", Some(Duration::from_secs(1)));
    tokio::time::sleep(Duration::from_millis(1200)).await;

    assert_eq!(cache.sweep_expired(), 1);
    assert_eq!(cache.len(), 0);

    cache.shutdown().await;
}

#[tokio::test]
async fn test_ttl_read_boundaries() {
    let cache = ViewCache::new(config(100, Duration::from_secs(300)));
    let ttl = Duration::from_millis(600);

    cache.put("k", 7u64, Some(ttl));

    tokio::time::sleep(ttl / 2).await;
    assert_eq!(*cache.get_as::<u64>("k").unwrap(), 7);

    tokio::time::sleep(ttl / 2 + Duration::from_millis(100)).await;
    assert!(cache.get_as::<u64>("k").is_none());

    cache.shutdown().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_writers_stay_bounded() {
    let cache = Arc::new(ViewCache::new(config(100, Duration::from_secs(300))));

    let writers: Vec<_> = (0..8)
        .map(|writer| {
            let cache = cache.clone();
            tokio::spawn(async move {
                for i in 0..250 {
                    cache.put(cache_key!("writer", writer, i), i, None);
                    let _ = cache.get(&cache_key!("writer", writer, i / 2));
                    if i % 25 == 0 {
                        tokio::task::yield_now().await;
                    }
                }
            })
        })
        .collect();

    for writer in writers {
        writer.await.unwrap();
    }

    tokio::time::sleep(Duration::from_millis(200)).await;

    assert!(cache.len() <= 100, "len {} over ceiling", cache.len());
    assert_eq!(cache.stats().total_entries, cache.len());

    cache.shutdown().await;
}

#[tokio::test]
async fn test_shutdown_flushes_and_is_idempotent() {
    let cache = ViewCache::new(config(100, Duration::from_secs(300)));
    let keys: Vec<String> = (0..20).map(|i| cache_key!("profile", i)).collect();
    for key in &keys {
        cache.put(key.clone(), key.len(), None);
    }
    assert!(cache.is_running());

    cache.shutdown().await;
    cache.shutdown().await;
    assert!(!cache.stop());

    assert_eq!(cache.len(), 0);
    for key in &keys {
        assert!(cache.get(key).is_none());
    }
}

#[tokio::test]
async fn test_reset_flushes() {
    let cache = ViewCache::new(config(100, Duration::from_secs(300)));
    cache.put("a", 1u8, None);
    cache.put("b", 2u8, None);

    assert_eq!(cache.reset(), 2);
    assert_eq!(cache.len(), 0);
    assert!(cache.get("a").is_none());

    cache.shutdown().await;
}

#[tokio::test]
async fn test_delete_many_keys() {
    let cache = ViewCache::new(config(100, Duration::from_secs(300)));
    cache.put("a", 1u8, None);
    cache.put("b", 2u8, None);
    cache.put("c", 3u8, None);

    assert_eq!(cache.delete(["a", "c", "missing"]), 2);
    assert_eq!(cache.len(), 1);
    assert!(cache.get("b").is_some());

    cache.shutdown().await;
}
