//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A stored value together with its absolute expiry instant.
///
/// Entries are replaced wholesale on overwrite, never merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Expiration instant, None = never expires
    pub expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `expires_at` - Absolute expiry instant, or None for no expiration
    pub fn new(value: V, expires_at: Option<Instant>) -> Self {
        Self { value, expires_at }
    }

    // == Is Expired ==
    /// Checks if the entry is stale at `now`.
    ///
    /// Boundary condition: an entry is still live at exactly its expiry
    /// instant and becomes stale once `now` is strictly later.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now > expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns the remaining lifetime at `now`, or None if no expiration is set.
    ///
    /// An expired entry reports `Some(Duration::ZERO)`.
    pub fn ttl_remaining_at(&self, now: Instant) -> Option<Duration> {
        self.expires_at
            .map(|expires| expires.saturating_duration_since(now))
    }
}
