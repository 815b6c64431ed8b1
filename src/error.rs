//! Error types for the cache layer
//!
//! Provides unified error handling using thiserror.
//!
//! These errors never cross the [`Cache`](crate::cache::Cache) trait: every
//! public operation logs the failure and reports the key as absent (or does
//! nothing, for writes). Only constructors surface them, since a driver that
//! cannot reach its store is a wiring problem rather than a cache miss.

use std::time::Duration;

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache layer.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Value could not be encoded for transport
    #[error("failed to encode value: {0}")]
    Encode(#[source] serde_json::Error),

    /// Stored payload could not be decoded back into a value
    #[error("failed to decode stored value: {0}")]
    Decode(#[source] serde_json::Error),

    /// The remote store rejected or failed a command
    #[error("store command failed: {0}")]
    Store(#[from] redis::RedisError),

    /// The operation deadline elapsed before the store answered
    #[error("operation exceeded deadline of {0:?}")]
    DeadlineExceeded(Duration),
}

// == Result Type Alias ==
/// Convenience Result type for the cache layer.
pub type Result<T> = std::result::Result<T, CacheError>;
