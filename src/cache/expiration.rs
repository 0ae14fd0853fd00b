//! Expiration Policy Module
//!
//! Lazy per-key staleness checks plus the amortized full-table sweep.

use std::hash::Hash;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::cache::{CacheEntry, OrderedStore};

// == Expiration Policy ==
/// Decides when entries are stale and when a full sweep is due.
///
/// There is no timer: the owner calls [`ExpirationPolicy::sweep_if_due`] at
/// the start of every public operation and pays for the sweep inline.
#[derive(Debug, Clone)]
pub struct ExpirationPolicy {
    /// Entry lifetime, None = entries never expire
    ttl: Option<Duration>,
    /// Minimum gap between two full sweeps
    sweep_interval: Option<Duration>,
    /// When the last full sweep ran
    last_sweep_at: Instant,
}

impl ExpirationPolicy {
    // == Constructor ==
    /// Creates a policy whose sweeps run at most every `ttl * sweep_multiplier`.
    pub fn new(ttl: Option<Duration>, sweep_multiplier: u32, now: Instant) -> Self {
        let sweep_interval = ttl.map(|ttl| ttl.saturating_mul(sweep_multiplier));
        Self {
            ttl,
            sweep_interval,
            last_sweep_at: now,
        }
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    pub fn sweep_interval(&self) -> Option<Duration> {
        self.sweep_interval
    }

    pub fn last_sweep_at(&self) -> Instant {
        self.last_sweep_at
    }

    // == Expiry Computation ==
    /// Computes a fresh absolute expiry for an entry written at `now`.
    pub fn expires_at(&self, now: Instant) -> Option<Instant> {
        self.ttl.and_then(|ttl| now.checked_add(ttl))
    }

    // == Lazy Check ==
    /// Checks a single entry against `now`.
    pub fn is_stale<V>(&self, entry: &CacheEntry<V>, now: Instant) -> bool {
        self.ttl.is_some() && entry.is_expired_at(now)
    }

    // == Sweep Schedule ==
    /// Returns true once `now` is strictly past `last_sweep_at + interval`.
    pub fn sweep_due(&self, now: Instant) -> bool {
        match self.sweep_interval {
            Some(interval) => now.saturating_duration_since(self.last_sweep_at) > interval,
            None => false,
        }
    }

    // == Sweep ==
    /// Removes every stale entry, oldest to newest, and records `now` as the
    /// last sweep time.
    ///
    /// Returns the number of entries removed.
    pub fn sweep<K, V>(&mut self, store: &mut OrderedStore<K, V>, now: Instant) -> usize
    where
        K: Hash + Eq + Clone,
    {
        let removed = if self.ttl.is_some() {
            store.remove_where(|_, entry| entry.is_expired_at(now))
        } else {
            0
        };
        self.last_sweep_at = now;

        debug!(removed, remaining = store.len(), "expiration sweep finished");
        removed
    }

    /// Runs [`ExpirationPolicy::sweep`] only when the schedule says so.
    pub fn sweep_if_due<K, V>(&mut self, store: &mut OrderedStore<K, V>, now: Instant) -> usize
    where
        K: Hash + Eq + Clone,
    {
        if self.sweep_due(now) {
            self.sweep(store, now)
        } else {
            0
        }
    }

    /// Restarts the sweep schedule from `now`.
    pub fn reset(&mut self, now: Instant) {
        self.last_sweep_at = now;
    }
}
