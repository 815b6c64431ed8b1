//! Cache Interface Module
//!
//! Defines the generic cache contract that every driver implements.

use std::time::Duration;

use async_trait::async_trait;

use crate::cache::StatsSnapshot;

// == Ttl ==
/// Remaining lifetime of a cache entry, as reported by [`Cache::get_ttl`].
///
/// "No expiration set" is represented explicitly rather than as a zero
/// duration, so callers can tell a persistent entry from one that is about
/// to lapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ttl {
    /// Entry expires after the given remaining duration
    Bounded(Duration),
    /// Entry exists but has no expiration set
    Unbounded,
}

impl Ttl {
    // == As Duration ==
    /// Returns the remaining duration, or None for entries without expiration.
    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            Ttl::Bounded(remaining) => Some(*remaining),
            Ttl::Unbounded => None,
        }
    }

    // == Is Unbounded ==
    /// Returns true if the entry has no expiration set.
    pub fn is_unbounded(&self) -> bool {
        matches!(self, Ttl::Unbounded)
    }
}

// == Cache Trait ==
/// Generic TTL key/value cache.
///
/// Every operation is a single round trip against the backing store. No
/// method surfaces an error: store, encoding, and deadline failures are
/// logged and collapsed into "absent" on read paths or silently dropped on
/// write paths. Callers therefore cannot distinguish a miss from an
/// unreachable store; the [`stats`](Cache::stats) counters are the only
/// place where swallowed failures remain visible.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Stores a value under `key`, overwriting any existing entry.
    ///
    /// `ttl` of `None` (or zero) stores the entry without expiration.
    /// A failed write is invisible to the caller.
    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>);

    /// Retrieves the value for `key`, or None if absent, expired, or the
    /// lookup failed.
    async fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Atomically retrieves and removes the value for `key`.
    ///
    /// At most one concurrent caller observes a given entry; atomicity is
    /// delegated to the backing store.
    async fn pop(&self, key: &str) -> Option<Vec<u8>>;

    /// Removes the entry for `key`. Removing an absent key is a no-op.
    async fn remove(&self, key: &str);

    /// Removes every entry whose key starts with `prefix`.
    ///
    /// Enumeration and deletion are separate steps with no isolation
    /// guarantee: entries created concurrently may survive the sweep.
    async fn remove_by_prefix(&self, prefix: &str);

    /// Returns the remaining lifetime of `key`, or None if absent, expired,
    /// or the query failed.
    async fn get_ttl(&self, key: &str) -> Option<Ttl>;

    /// Returns a snapshot of the driver's hit/miss/error counters.
    fn stats(&self) -> StatsSnapshot;
}
