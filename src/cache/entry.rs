//! Cache Entry Module
//!
//! Defines the structure for individual in-memory cache entries with TTL
//! support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single in-memory cache entry.
#[derive(Debug, Clone)]
pub struct Entry {
    /// The stored value
    pub value: Vec<u8>,
    /// Expiration instant, None = no expiration
    pub expires_at: Option<Instant>,
}

impl Entry {
    // == Constructor ==
    /// Creates a new entry with an optional TTL.
    ///
    /// A `ttl` of `None` or zero stores the entry without expiration,
    /// matching the remote driver's handling of zero durations.
    pub fn new(value: Vec<u8>, ttl: Option<Duration>) -> Self {
        let expires_at = match ttl {
            Some(ttl) if !ttl.is_zero() => Some(Instant::now() + ttl),
            _ => None,
        };

        Self { value, expires_at }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired once the current instant is
    /// greater than or equal to the expiration instant, so a fully elapsed
    /// TTL makes the entry unobservable immediately.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => Instant::now() >= expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns the remaining TTL, or None if no expiration is set.
    ///
    /// An expired entry reports a remaining TTL of zero.
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|expires| expires.saturating_duration_since(Instant::now()))
    }
}
