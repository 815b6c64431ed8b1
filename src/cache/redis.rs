//! Redis Cache Module
//!
//! TTL cache facade over a remote Redis server.
//!
//! Every operation is one command against the store (`SET`/`PSETEX`, `GET`,
//! `GETDEL`, `DEL`, `KEYS` + `DEL`, `PTTL`) with no retries and no backoff.
//! Expiration is enforced server-side. Failures are logged and collapsed:
//! reads report a miss, writes report nothing.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tracing::{debug, error, warn};

use crate::cache::{codec, Cache, CacheStats, StatsSnapshot, Ttl};
use crate::config::Config;
use crate::error::{CacheError, Result};

/// PTTL reply for a key that exists without an expiration.
const PTTL_NO_EXPIRY: i64 = -1;
/// PTTL reply for a key that does not exist.
const PTTL_MISSING_KEY: i64 = -2;

// == Redis Cache ==
/// Remote TTL cache driver.
///
/// Holds one multiplexed connection handle; clones of the handle share the
/// underlying connection and are safe to use from concurrent tasks, so the
/// driver itself does no request serialization or queuing.
#[derive(Clone)]
pub struct RedisCache {
    conn: MultiplexedConnection,
    op_timeout: Option<Duration>,
    scoped_prefix_removal: bool,
    stats: Arc<CacheStats>,
}

impl RedisCache {
    // == Constructor ==
    /// Wraps an already-established connection handle.
    pub fn new(conn: MultiplexedConnection, config: &Config) -> Self {
        Self {
            conn,
            op_timeout: config.op_timeout(),
            scoped_prefix_removal: config.scoped_prefix_removal,
            stats: Arc::new(CacheStats::new()),
        }
    }

    // == Connect ==
    /// Opens a connection to the configured Redis server.
    ///
    /// This is the only place a store failure reaches the caller: a facade
    /// without a connection cannot degrade into cache misses.
    pub async fn connect(config: &Config) -> Result<Self> {
        let client = redis::Client::open(config.redis_url.as_str())?;
        let conn = client.get_multiplexed_async_connection().await?;
        Ok(Self::new(conn, config))
    }

    // == Run ==
    /// Drives one store command, applying the per-operation deadline when
    /// `scoped` is set and a deadline is configured.
    async fn run<T, F>(&self, op: F, scoped: bool) -> Result<T>
    where
        F: Future<Output = redis::RedisResult<T>>,
    {
        match self.op_timeout.filter(|_| scoped) {
            Some(limit) => match tokio::time::timeout(limit, op).await {
                Ok(outcome) => outcome.map_err(CacheError::Store),
                Err(_) => Err(CacheError::DeadlineExceeded(limit)),
            },
            None => op.await.map_err(CacheError::Store),
        }
    }
}

// == Reply Mapping ==
/// Collapses a fetched payload into the public read contract: decode
/// failures and transport errors are logged, counted, and reported as a
/// miss.
fn collapse_read(stats: &CacheStats, outcome: Result<Option<Vec<u8>>>) -> Option<Vec<u8>> {
    match outcome {
        Ok(Some(payload)) => match codec::decode(&payload) {
            Ok(value) => {
                stats.record_hit();
                Some(value)
            }
            Err(err) => {
                error!("error deserializing value: {}", err);
                stats.record_error();
                stats.record_miss();
                None
            }
        },
        // Key does not exist
        Ok(None) => {
            stats.record_miss();
            None
        }
        Err(err) => {
            error!("error reading value from redis: {}", err);
            stats.record_error();
            stats.record_miss();
            None
        }
    }
}

/// Maps a PTTL reply onto the TTL tri-state.
fn ttl_from_pttl(reply: i64) -> Option<Ttl> {
    match reply {
        PTTL_MISSING_KEY => None,
        PTTL_NO_EXPIRY => Some(Ttl::Unbounded),
        ms if ms >= 0 => Some(Ttl::Bounded(Duration::from_millis(ms as u64))),
        // Unknown negative sentinel, treat the key as absent
        _ => None,
    }
}

/// Glob pattern matching every key under `prefix`.
fn prefix_pattern(prefix: &str) -> String {
    format!("{}*", prefix)
}

/// Converts a TTL to the whole milliseconds PSETEX expects, clamping to at
/// least one (Redis rejects a zero expiry).
fn ttl_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1)
}

// == Cache Trait Implementation ==
#[async_trait]
impl Cache for RedisCache {
    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) {
        let payload = match codec::encode(value) {
            Ok(payload) => payload,
            Err(err) => {
                error!("error serializing value: {}", err);
                self.stats.record_error();
                return;
            }
        };

        let mut conn = self.conn.clone();
        let outcome = self
            .run(
                async move {
                    match ttl {
                        // Zero means "no expiration", same as an absent TTL
                        Some(ttl) if !ttl.is_zero() => {
                            conn.pset_ex::<_, _, ()>(key, payload, ttl_millis(ttl)).await
                        }
                        _ => conn.set::<_, _, ()>(key, payload).await,
                    }
                },
                true,
            )
            .await;

        if let Err(err) = outcome {
            error!("error writing value to redis: {}", err);
            self.stats.record_error();
        }
    }

    async fn get(&self, key: &str) -> Option<Vec<u8>> {
        let mut conn = self.conn.clone();
        let outcome = self
            .run(async move { conn.get::<_, Option<Vec<u8>>>(key).await }, true)
            .await;
        collapse_read(&self.stats, outcome)
    }

    async fn pop(&self, key: &str) -> Option<Vec<u8>> {
        // GETDEL: the server removes the entry in the same step, so no other
        // caller can observe the value afterwards
        let mut conn = self.conn.clone();
        let outcome = self
            .run(
                async move { conn.get_del::<_, Option<Vec<u8>>>(key).await },
                true,
            )
            .await;
        collapse_read(&self.stats, outcome)
    }

    async fn remove(&self, key: &str) {
        let mut conn = self.conn.clone();
        let outcome = self
            .run(async move { conn.del::<_, ()>(key).await }, true)
            .await;

        if let Err(err) = outcome {
            error!("error removing key from redis: {}", err);
            self.stats.record_error();
        }
    }

    async fn remove_by_prefix(&self, prefix: &str) {
        // Two round trips with no isolation in between; keys created while
        // the sweep runs may survive it
        let scoped = self.scoped_prefix_removal;
        let pattern = prefix_pattern(prefix);

        let mut conn = self.conn.clone();
        let keys: Vec<String> = match self
            .run(async move { conn.keys::<_, Vec<String>>(pattern).await }, scoped)
            .await
        {
            Ok(keys) => keys,
            Err(err) => {
                warn!("error enumerating keys from redis: {}", err);
                self.stats.record_error();
                return;
            }
        };

        if keys.is_empty() {
            return;
        }

        let count = keys.len();
        let mut conn = self.conn.clone();
        match self
            .run(async move { conn.del::<_, ()>(keys).await }, scoped)
            .await
        {
            Ok(()) => debug!("prefix sweep '{}' removed {} keys", prefix, count),
            Err(err) => {
                warn!("error deleting keys from redis: {}", err);
                self.stats.record_error();
            }
        }
    }

    async fn get_ttl(&self, key: &str) -> Option<Ttl> {
        let mut conn = self.conn.clone();
        let outcome = self
            .run(async move { conn.pttl::<_, i64>(key).await }, true)
            .await;

        match outcome {
            Ok(reply) => ttl_from_pttl(reply),
            Err(err) => {
                error!("error reading ttl from redis: {}", err);
                self.stats.record_error();
                None
            }
        }
    }

    fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }
}
