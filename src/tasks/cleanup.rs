//! TTL Cleanup Task
//!
//! Background task that periodically removes expired entries from the
//! in-memory driver.
//!
//! The remote driver needs no equivalent: Redis expires keys server-side.
//! Without the reaper the memory driver stays correct (reads treat expired
//! entries as absent) but entries nobody touches again would sit in the map
//! until process exit.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::InMemoryCache;

/// Spawns a background task that periodically purges expired cache entries.
///
/// The task loops forever, sleeping for the given interval between purge
/// runs. The returned handle lets the application abort it during graceful
/// shutdown.
///
/// # Arguments
/// * `cache` - Handle to the in-memory cache to reap
/// * `cleanup_interval_secs` - Interval in seconds between purge runs
pub fn spawn_cleanup_task(cache: InMemoryCache, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs);

    tokio::spawn(async move {
        info!(
            "starting TTL cleanup task with interval of {} seconds",
            cleanup_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.purge_expired();

            if removed > 0 {
                info!("TTL cleanup: removed {} expired entries", removed);
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}
