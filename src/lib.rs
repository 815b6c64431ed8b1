//! TTL key/value cache layer for the request pipeline.
//!
//! Memoizes rate-limit counters, blocklists, and request-classification
//! results behind the generic [`Cache`] trait. The Redis driver delegates
//! storage and expiration to a remote server; the in-memory driver keeps a
//! process-local map for single-node deployments and tests.
//!
//! No cache operation surfaces errors: failures are logged and reads
//! collapse into misses, so a broken store degrades the pipeline to
//! uncached behavior instead of failing requests.
//!
//! ```no_run
//! use std::time::Duration;
//! use waf_cache::{from_config, Cache, Config};
//!
//! # async fn wire() -> Result<(), waf_cache::CacheError> {
//! let config = Config::from_env();
//! let (cache, reaper) = from_config(&config).await?;
//!
//! cache
//!     .set("ratelimit:203.0.113.7", b"12", Some(Duration::from_secs(60)))
//!     .await;
//! let counter = cache.get("ratelimit:203.0.113.7").await;
//! # drop(counter);
//!
//! // At shutdown, stop the memory driver's reaper if one was spawned
//! if let Some(reaper) = reaper {
//!     reaper.abort();
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{from_config, Cache, InMemoryCache, RedisCache, StatsSnapshot, Ttl};
pub use config::{CacheDriver, Config};
pub use error::CacheError;
pub use tasks::spawn_cleanup_task;
