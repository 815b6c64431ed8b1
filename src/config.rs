//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;
use std::time::Duration;

use tracing::warn;

// == Cache Driver ==
/// Which backing store the cache layer talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheDriver {
    /// Process-local TTL store
    Memory,
    /// Remote Redis server
    Redis,
}

impl CacheDriver {
    /// Parses a driver name, falling back to `Memory` for unknown values.
    fn parse(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "redis" => CacheDriver::Redis,
            "memory" => CacheDriver::Memory,
            other => {
                warn!("unknown cache driver '{}', falling back to memory", other);
                CacheDriver::Memory
            }
        }
    }
}

// == Config ==
/// Cache layer configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backing store driver
    pub driver: CacheDriver,
    /// Redis connection URL (redis driver only)
    pub redis_url: String,
    /// Per-operation deadline in milliseconds, 0 = no deadline
    pub op_timeout_ms: u64,
    /// Whether `remove_by_prefix` honors the per-operation deadline.
    /// When false the sweep runs unscoped and may outlive the request
    /// that triggered it.
    pub scoped_prefix_removal: bool,
    /// Reaper interval in seconds (memory driver only)
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_DRIVER` - "memory" or "redis" (default: memory)
    /// - `REDIS_URL` - Redis connection URL (default: redis://127.0.0.1:6379)
    /// - `CACHE_OP_TIMEOUT_MS` - Per-operation deadline in ms, 0 disables (default: 0)
    /// - `SCOPED_PREFIX_REMOVAL` - Apply the deadline to prefix sweeps (default: false)
    /// - `CLEANUP_INTERVAL` - Reaper frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        Self {
            driver: env::var("CACHE_DRIVER")
                .map(|v| CacheDriver::parse(&v))
                .unwrap_or(CacheDriver::Memory),
            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string()),
            op_timeout_ms: env::var("CACHE_OP_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
            scoped_prefix_removal: env::var("SCOPED_PREFIX_REMOVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
        }
    }

    /// Returns the per-operation deadline, or None when disabled.
    pub fn op_timeout(&self) -> Option<Duration> {
        match self.op_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            driver: CacheDriver::Memory,
            redis_url: "redis://127.0.0.1:6379".to_string(),
            op_timeout_ms: 0,
            scoped_prefix_removal: false,
            cleanup_interval: 1,
        }
    }
}
