//! Configuration Module
//!
//! Handles loading process configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::cache::{CacheConfig, DEFAULT_MAX_ITEMS, DEFAULT_SWEEP_INTERVAL, DEFAULT_TTL};

/// Process configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Capacity ceiling of the view cache
    pub max_items: usize,
    /// Default TTL in seconds for entries stored without one
    pub default_ttl: u64,
    /// Expiry sweep interval in seconds
    pub sweep_interval: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Optional JSON file seeding the user directory
    pub user_directory: Option<PathBuf>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_ITEMS` - Capacity ceiling, at least 1 (default: 100)
    /// - `CACHE_DEFAULT_TTL` - Default TTL in seconds (default: 180)
    /// - `CACHE_SWEEP_INTERVAL` - Sweep interval in seconds (default: 180)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `USER_DIRECTORY_FILE` - User directory JSON file (default: none)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_items: checked_max_items(parse_var("CACHE_MAX_ITEMS"), defaults.max_items),
            default_ttl: parse_var("CACHE_DEFAULT_TTL").unwrap_or(defaults.default_ttl),
            sweep_interval: parse_var("CACHE_SWEEP_INTERVAL").unwrap_or(defaults.sweep_interval),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            user_directory: env::var("USER_DIRECTORY_FILE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    /// Cache settings derived from this configuration.
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            max_items: self.max_items,
            default_ttl: Duration::from_secs(self.default_ttl),
            sweep_interval: Duration::from_secs(self.sweep_interval),
        }
    }
}

/// A ceiling of 0 would make every put evict the whole store.
fn checked_max_items(value: Option<usize>, default: usize) -> usize {
    match value {
        Some(0) => {
            warn!("CACHE_MAX_ITEMS must be at least 1, using default {}", default);
            default
        }
        Some(max_items) => max_items,
        None => default,
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
            default_ttl: DEFAULT_TTL.as_secs(),
            sweep_interval: DEFAULT_SWEEP_INTERVAL.as_secs(),
            server_port: 3000,
            user_directory: None,
        }
    }
}
