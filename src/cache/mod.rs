//! Cache Module
//!
//! TTL key/value caching behind a generic [`Cache`] trait.
//!
//! Two drivers implement the trait: [`RedisCache`] delegates every operation
//! to a remote Redis server, [`InMemoryCache`] keeps entries in a local map.
//! [`from_config`] picks between them at startup.

mod codec;
mod entry;
mod interface;
mod memory;
mod redis;
mod stats;


// Re-export public types
pub use self::redis::RedisCache;
pub use entry::Entry;
pub use interface::{Cache, Ttl};
pub use memory::InMemoryCache;
pub use stats::{CacheStats, StatsSnapshot};

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::config::{CacheDriver, Config};
use crate::error::Result;
use crate::tasks::spawn_cleanup_task;

// == Driver Factory ==
/// Builds the configured cache driver.
///
/// The Redis driver connects eagerly and fails construction when the server
/// is unreachable; after construction no operation surfaces errors anymore.
/// For the memory driver a background reaper is spawned at the configured
/// interval and its handle returned, so the application can abort it during
/// shutdown. The Redis driver expires entries server-side and needs no
/// reaper.
pub async fn from_config(config: &Config) -> Result<(Arc<dyn Cache>, Option<JoinHandle<()>>)> {
    match config.driver {
        CacheDriver::Memory => {
            let cache = InMemoryCache::new();
            let reaper = spawn_cleanup_task(cache.clone(), config.cleanup_interval);
            Ok((Arc::new(cache), Some(reaper)))
        }
        CacheDriver::Redis => {
            let cache = RedisCache::connect(config).await?;
            Ok((Arc::new(cache), None))
        }
    }
}
