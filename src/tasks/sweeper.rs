//! Cache Sweeper Task
//!
//! Background control loop that owns the periodic timer. It runs expiry
//! sweeps on every tick, serves pressure-eviction and lazy-expiry requests
//! raised by the store, and flushes the store once when told to stop.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Shortest sweep period the timer accepts.
const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(1);

/// Spawns the sweeper loop for `store`.
///
/// The loop selects between:
/// - timer tick: remove expired entries
/// - pressure request: halve the store by approximate recency
/// - expiry request (an expired entry was read): remove expired entries
/// - stop signal, or the sender being dropped: stop the timer, flush, exit
///
/// Requests raised while one of the same kind is pending collapse into a
/// single pass. Each pass holds the store lock for its duration.
///
/// # Arguments
/// * `store` - Shared cache store to maintain
/// * `sweep_interval` - Period between expiry sweeps
/// * `stop` - One-shot stop signal
///
/// # Returns
/// A JoinHandle that completes after the final flush.
pub fn spawn_sweeper(
    store: Arc<CacheStore>,
    sweep_interval: Duration,
    mut stop: oneshot::Receiver<()>,
) -> JoinHandle<()> {
    let period = sweep_interval.max(MIN_SWEEP_INTERVAL);

    tokio::spawn(async move {
        info!("Starting cache sweeper with interval of {:?}", period);

        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                signal = &mut stop => {
                    if signal.is_err() {
                        debug!("Stop handle dropped, shutting sweeper down");
                    }
                    break;
                }
                _ = ticker.tick() => {
                    store.sweep_expired();
                }
                _ = store.pressure_notified() => {
                    store.relieve_pressure();
                }
                _ = store.expiry_notified() => {
                    store.sweep_expired();
                }
            }
        }

        drop(ticker);
        let flushed = store.reset();
        info!("Cache sweeper stopped, {} entries flushed", flushed);
    })
}
