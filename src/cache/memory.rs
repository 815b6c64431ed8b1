//! In-Memory Cache Module
//!
//! Process-local TTL store implementing the same contract as the Redis
//! driver, for single-node deployments and tests.
//!
//! Entries expire lazily on access; a periodic reaper
//! ([`spawn_cleanup_task`](crate::tasks::spawn_cleanup_task)) removes
//! entries nobody reads again. There is no capacity bound and no eviction:
//! lifetime management is TTL only, as with the remote driver.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::cache::{Cache, CacheStats, Entry, StatsSnapshot, Ttl};

// == In-Memory Cache ==
/// Shared-map TTL cache.
///
/// Cloning is cheap and clones operate on the same underlying map, so one
/// handle can serve request tasks while another feeds the reaper.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCache {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
    stats: Arc<CacheStats>,
}

impl InMemoryCache {
    // == Constructor ==
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    // Lock guards; a poisoned lock only means a panic elsewhere mid-write,
    // and the map is still structurally sound for cache purposes.
    fn read_entries(&self) -> RwLockReadGuard<'_, HashMap<String, Entry>> {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_entries(&self) -> RwLockWriteGuard<'_, HashMap<String, Entry>> {
        self.entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // == Insert ==
    /// Stores a value, overwriting any existing entry and resetting its TTL.
    pub fn insert(&self, key: &str, value: &[u8], ttl: Option<Duration>) {
        let entry = Entry::new(value.to_vec(), ttl);
        self.write_entries().insert(key.to_string(), entry);
    }

    // == Lookup ==
    /// Returns the value for `key`, dropping the entry if it has expired.
    pub fn lookup(&self, key: &str) -> Option<Vec<u8>> {
        let mut entries = self.write_entries();
        match entries.get(key) {
            Some(entry) if entry.is_expired() => {
                entries.remove(key);
                self.stats.record_miss();
                None
            }
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Take ==
    /// Removes and returns the value for `key`.
    ///
    /// The map lock makes this atomic: no two callers can take the same
    /// entry.
    pub fn take(&self, key: &str) -> Option<Vec<u8>> {
        let mut entries = self.write_entries();
        match entries.remove(key) {
            Some(entry) if entry.is_expired() => {
                self.stats.record_miss();
                None
            }
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Delete ==
    /// Removes the entry for `key`; absent keys are a no-op.
    pub fn delete(&self, key: &str) {
        self.write_entries().remove(key);
    }

    // == Delete Prefix ==
    /// Removes every entry whose key starts with `prefix`.
    ///
    /// Returns the number of entries removed.
    pub fn delete_prefix(&self, prefix: &str) -> usize {
        let mut entries = self.write_entries();
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        before - entries.len()
    }

    // == Ttl Lookup ==
    /// Returns the remaining lifetime of `key`, dropping expired entries.
    pub fn ttl(&self, key: &str) -> Option<Ttl> {
        let mut entries = self.write_entries();
        match entries.get(key) {
            Some(entry) if entry.is_expired() => {
                entries.remove(key);
                None
            }
            Some(entry) => match entry.ttl_remaining() {
                Some(remaining) => Some(Ttl::Bounded(remaining)),
                None => Some(Ttl::Unbounded),
            },
            None => None,
        }
    }

    // == Purge Expired ==
    /// Removes all expired entries.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&self) -> usize {
        let mut entries = self.write_entries();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired());
        before - entries.len()
    }

    // == Length ==
    /// Returns the current number of entries, expired ones included.
    pub fn len(&self) -> usize {
        self.read_entries().len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.read_entries().is_empty()
    }
}

// == Cache Trait Implementation ==
#[async_trait]
impl Cache for InMemoryCache {
    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) {
        self.insert(key, value, ttl);
    }

    async fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.lookup(key)
    }

    async fn pop(&self, key: &str) -> Option<Vec<u8>> {
        self.take(key)
    }

    async fn remove(&self, key: &str) {
        self.delete(key);
    }

    async fn remove_by_prefix(&self, prefix: &str) {
        let removed = self.delete_prefix(prefix);
        debug!("prefix sweep '{}' removed {} entries", prefix, removed);
    }

    async fn get_ttl(&self, key: &str) -> Option<Ttl> {
        self.ttl(key)
    }

    fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }
}
