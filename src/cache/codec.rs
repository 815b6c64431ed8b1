//! Value Codec Module
//!
//! Transport encoding for cached values.
//!
//! Values are opaque byte sequences to the cache layer. They are stored as
//! JSON byte arrays, a self-describing encoding that survives any transport
//! and round-trips every byte sequence, including the empty one.

use crate::error::{CacheError, Result};

// == Encode ==
/// Encodes a raw value into its transport representation.
pub fn encode(value: &[u8]) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(CacheError::Encode)
}

// == Decode ==
/// Decodes a transport representation back into the raw value.
///
/// Fails on any payload that is not a well-formed encoding of a byte
/// sequence; callers treat that as the entry being absent.
pub fn decode(payload: &[u8]) -> Result<Vec<u8>> {
    serde_json::from_slice(payload).map_err(CacheError::Decode)
}
