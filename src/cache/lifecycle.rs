//! View Cache Module
//!
//! The owning aggregate: a [`CacheStore`] plus the background sweeper that
//! runs its eviction strategies, and the one-shot stop signal that ends it.
//! Construct one per process and share it (`Arc<ViewCache>`) with every
//! consumer.

use std::any::Any;
use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::cache::{derive_key, CacheConfig, CacheStats, CacheStore, CacheValue};
use crate::tasks::spawn_sweeper;

// == View Cache ==
/// Managed cache with a background sweeper.
///
/// Must be created inside a Tokio runtime. After [`ViewCache::stop`] the
/// cache keeps answering reads and writes, but nothing expires or evicts
/// entries automatically anymore.
#[derive(Debug)]
pub struct ViewCache {
    store: Arc<CacheStore>,
    stop_tx: Mutex<Option<oneshot::Sender<()>>>,
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

impl ViewCache {
    // == Constructor ==
    /// Creates the cache and starts its sweeper.
    pub fn new(config: CacheConfig) -> Self {
        let store = Arc::new(CacheStore::from_config(&config));
        let (stop_tx, stop_rx) = oneshot::channel();
        let sweeper = spawn_sweeper(store.clone(), config.sweep_interval, stop_rx);

        info!(
            "View cache started: max_items={}, default_ttl={:?}, sweep_interval={:?}",
            config.max_items, config.default_ttl, config.sweep_interval
        );

        Self {
            store,
            stop_tx: Mutex::new(Some(stop_tx)),
            sweeper: Mutex::new(Some(sweeper)),
        }
    }

    // == Key ==
    /// Derives an order-independent key. See [`derive_key`].
    pub fn key(values: &[&dyn Display]) -> String {
        derive_key(values)
    }

    // == Get ==
    /// Returns the shared payload for `key`, if live.
    pub fn get(&self, key: &str) -> Option<CacheValue> {
        self.store.get(key)
    }

    /// Returns the payload for `key` downcast to `T`.
    ///
    /// A payload of another type reads as `None`.
    pub fn get_as<T: Any + Send + Sync>(&self, key: &str) -> Option<Arc<T>> {
        self.store.get(key).and_then(|value| value.downcast::<T>().ok())
    }

    // == Put ==
    /// Stores `value` under `key`, with the default TTL when `ttl` is None.
    pub fn put<T>(&self, key: impl Into<String>, value: T, ttl: Option<Duration>)
    where
        T: Any + Send + Sync,
    {
        self.store.put(key, Arc::new(value), ttl);
    }

    /// Stores an already shared payload.
    pub fn put_shared(&self, key: impl Into<String>, value: CacheValue, ttl: Option<Duration>) {
        self.store.put(key, value, ttl);
    }

    // == Delete ==
    /// Removes the given keys. Returns how many existed.
    pub fn delete<I, K>(&self, keys: I) -> usize
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        self.store.delete(keys)
    }

    // == Reset ==
    /// Drops every entry. Returns how many were dropped.
    pub fn reset(&self) -> usize {
        self.store.reset()
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    // == Capacity ==
    pub fn max_items(&self) -> usize {
        self.store.max_items()
    }

    /// Changes the capacity ceiling; may request a pressure eviction.
    pub fn set_max_items(&self, max_items: usize) {
        info!("Cache capacity changed to {}", max_items);
        self.store.set_max_items(max_items);
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        self.store.stats()
    }

    /// Runs an expiry sweep now, outside the timer. Returns entries removed.
    pub fn sweep_expired(&self) -> usize {
        self.store.sweep_expired()
    }

    // == Lifecycle ==
    /// Whether the sweeper is still running.
    pub fn is_running(&self) -> bool {
        self.sweeper
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Signals the sweeper to stop. The sweeper flushes the cache on its way
    /// out.
    ///
    /// Returns `true` only for the call that actually sent the signal.
    pub fn stop(&self) -> bool {
        let Some(stop_tx) = self.stop_tx.lock().take() else {
            debug!("View cache already stopped");
            return false;
        };

        // The sweeper may already be gone if its task panicked.
        if stop_tx.send(()).is_err() {
            debug!("Sweeper exited before stop signal");
        }
        true
    }

    /// Stops the sweeper and waits for its final flush.
    ///
    /// Any eviction already in progress finishes first. Safe to call more
    /// than once.
    pub async fn shutdown(&self) {
        self.stop();

        let handle = self.sweeper.lock().take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                error!("Sweeper task failed: {}", e);
                self.store.reset();
            }
        }
        info!("View cache shut down");
    }
}
