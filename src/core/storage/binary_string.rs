// src/core/storage/binary_string.rs

//! A binary-safe byte value with an optional absolute wall-clock expiry.

use bytes::{Bytes, BytesMut};
use std::time::{Duration, SystemTime};

/// A binary-safe string value, optionally carrying a TTL.
///
/// Expiry is measured against the wall clock rather than a monotonic clock,
/// matching the source's use of absolute deadlines.
#[derive(Debug, Clone)]
pub struct BinaryString {
    bytes: Bytes,
    expiry: Option<SystemTime>,
}

impl BinaryString {
    /// Creates a value with no expiry.
    pub fn new(bytes: Bytes) -> Self {
        Self {
            bytes,
            expiry: None,
        }
    }

    /// Creates a value that expires `ttl_ms` milliseconds from now.
    pub fn new_with_ttl(bytes: Bytes, ttl_ms: u64) -> Self {
        Self {
            bytes,
            expiry: Some(SystemTime::now() + Duration::from_millis(ttl_ms)),
        }
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Replaces the payload in place, growing a `BytesMut` scratch buffer
    /// without disturbing the expiry.
    pub fn set_bytes_from(&mut self, buf: BytesMut) {
        self.bytes = buf.freeze();
    }

    pub fn expiry(&self) -> Option<SystemTime> {
        self.expiry
    }

    /// True iff an expiry is set and strictly before the current instant.
    pub fn has_expired(&self) -> bool {
        match self.expiry {
            Some(deadline) => SystemTime::now() > deadline,
            None => false,
        }
    }
}
