//! Unsynchronized Cache Module
//!
//! The unsynchronized cache: ordered store, lazy and periodic expiration,
//! capacity eviction and read promotion.

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::cache::{
    CacheEntry, CacheSettings, Clock, ExpirationPolicy, KeySnapshot, OrderedStore, Promotion,
    PromotionStrategy, SyncCache, SystemClock,
};
use crate::error::{CacheError, Result};

// == Cache ==
/// Bounded, optionally time-limited key-value cache.
///
/// Every method takes `&mut self`; callers needing shared access across
/// threads should use [`SyncCache`].
///
/// # Example
/// ```
/// use simple_cache::Cache;
///
/// let mut cache = Cache::new(3).unwrap();
/// cache.set(1, 'a');
/// cache.set(2, 'b');
/// cache.set(3, 'c');
/// cache.set(4, 'd');
///
/// assert!(!cache.contains(&1));
/// assert_eq!(cache.get(&4), Ok('d'));
/// assert_eq!(cache.len(), 3);
/// ```
#[derive(Debug)]
pub struct Cache<K, V> {
    /// Entries in insertion/promotion order
    store: OrderedStore<K, V>,
    /// Lazy checks and sweep schedule
    expiration: ExpirationPolicy,
    /// Maximum number of live entries
    capacity: usize,
    /// Read-hit behavior
    promotion: Promotion<K, V>,
    /// Time source
    clock: Arc<dyn Clock>,
}

impl<K, V> Cache<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructors ==
    /// Creates a cache holding at most `capacity` entries that never expire.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_settings(CacheSettings::with_capacity(capacity))
    }

    /// Creates a cache whose entries expire `ttl` after their last write or read.
    pub fn with_ttl(capacity: usize, ttl: Duration) -> Result<Self> {
        Self::with_settings(CacheSettings {
            capacity,
            ttl: Some(ttl),
            ..CacheSettings::default()
        })
    }

    /// Creates a cache from validated settings with default promotion.
    pub fn with_settings(settings: CacheSettings) -> Result<Self> {
        Self::from_parts(settings, Promotion::default(), Arc::new(SystemClock))
    }

    /// Starts a [`CacheBuilder`].
    pub fn builder() -> CacheBuilder<K, V> {
        CacheBuilder::new()
    }

    fn from_parts(
        settings: CacheSettings,
        promotion: Promotion<K, V>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        settings.validate()?;

        debug!(
            capacity = settings.capacity,
            ttl = ?settings.ttl,
            sweep_multiplier = settings.sweep_multiplier,
            promotion = ?promotion,
            "cache created"
        );

        let now = clock.now();
        Ok(Self {
            store: OrderedStore::with_capacity(settings.capacity.min(1024)),
            expiration: ExpirationPolicy::new(settings.ttl, settings.sweep_multiplier, now),
            capacity: settings.capacity,
            promotion,
            clock,
        })
    }

    // == Housekeeping ==
    // Reads the clock and runs the periodic sweep if it is due.
    fn maintain(&mut self) -> Instant {
        let now = self.clock.now();
        self.expiration.sweep_if_due(&mut self.store, now);
        now
    }

    // Drops `key` if it is stale. Returns true when a live entry remains.
    fn expire_if_stale<Q>(&mut self, key: &Q, now: Instant) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let stale = match self.store.get(key) {
            Some(entry) => self.expiration.is_stale(entry, now),
            None => return false,
        };

        if stale {
            self.store.remove(key);
            trace!("expired entry removed on access");
            false
        } else {
            true
        }
    }

    // Removes oldest entries until the store fits its capacity.
    fn evict_overflow(&mut self) {
        while self.store.len() > self.capacity {
            if self.store.pop_oldest().is_none() {
                break;
            }
            debug!(
                capacity = self.capacity,
                len = self.store.len(),
                "evicted oldest entry"
            );
        }
    }

    // == Set ==
    /// Stores `value` under `key`, replacing any previous entry.
    ///
    /// The key moves to the newest position and gets a fresh expiry. If the
    /// cache then holds more than `capacity` entries, the oldest is evicted.
    pub fn set(&mut self, key: K, value: V) {
        let now = self.maintain();
        self.expire_if_stale(&key, now);

        let entry = CacheEntry::new(value, self.expiration.expires_at(now));
        self.store.insert(key, entry);
        self.evict_overflow();
    }

    // == Get ==
    /// Returns a clone of the value stored under `key`.
    ///
    /// A hit runs the promotion strategy; under the default strategy that
    /// moves the key to the newest position and restarts its TTL.
    ///
    /// # Errors
    /// [`CacheError::NotFound`] when the key is absent or has expired. An
    /// expired entry is removed as part of the failed lookup.
    pub fn get<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        let now = self.maintain();
        if !self.expire_if_stale(key, now) {
            return Err(CacheError::NotFound);
        }

        let (stored_key, value) = match self.store.get_key_value(key) {
            Some((stored_key, entry)) => (stored_key.clone(), entry.value.clone()),
            None => return Err(CacheError::NotFound),
        };

        let fresh_expiry = self.expiration.expires_at(now);
        self.promotion
            .apply(&mut self.store, &stored_key, &value, fresh_expiry);
        // Custom strategies may write to the store
        self.evict_overflow();

        Ok(value)
    }

    // == Contains ==
    /// Returns true when `key` holds a live entry.
    ///
    /// Never promotes. An expired entry is removed and reported as absent.
    pub fn contains<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = self.maintain();
        self.expire_if_stale(key, now)
    }

    // == Delete ==
    /// Removes `key` unconditionally, whether or not it has expired.
    ///
    /// # Errors
    /// [`CacheError::NotFound`] when the key is absent.
    pub fn delete<Q>(&mut self, key: &Q) -> Result<()>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.store
            .remove(key)
            .map(|_| ())
            .ok_or(CacheError::NotFound)
    }

    // == Length ==
    /// Returns the number of stored entries after a possible sweep.
    ///
    /// Expired entries that neither a sweep nor an access has reached yet are
    /// still counted.
    pub fn len(&mut self) -> usize {
        self.maintain();
        self.store.len()
    }

    pub fn is_empty(&mut self) -> bool {
        self.len() == 0
    }

    // == Keys ==
    /// Snapshots the current key order, oldest to newest.
    pub fn keys(&mut self) -> KeySnapshot<K> {
        self.maintain();
        KeySnapshot::new(self.store.keys().cloned().collect())
    }

    // == Time To Live ==
    /// Remaining lifetime of `key`.
    ///
    /// None when the key is absent, expired, or the cache has no TTL. Does not
    /// promote.
    pub fn time_to_live<Q>(&mut self, key: &Q) -> Option<Duration>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = self.maintain();
        if !self.expire_if_stale(key, now) {
            return None;
        }
        self.store
            .get(key)
            .and_then(|entry| entry.ttl_remaining_at(now))
    }

    // == Purge Expired ==
    /// Runs a full sweep now, regardless of the sweep schedule.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now();
        self.expiration.sweep(&mut self.store, now)
    }

    // == Clear ==
    /// Removes every entry and restarts the sweep schedule.
    pub fn clear(&mut self) {
        self.store.clear();
        self.expiration.reset(self.clock.now());
    }

    // == Accessors ==
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.expiration.ttl()
    }

    pub fn sweep_interval(&self) -> Option<Duration> {
        self.expiration.sweep_interval()
    }

    pub fn promotion(&self) -> &Promotion<K, V> {
        &self.promotion
    }
}

// == Cache Builder ==
/// Fluent construction of [`Cache`] and [`SyncCache`].
///
/// ```
/// use std::time::Duration;
/// use simple_cache::{Cache, Promotion};
///
/// let cache = Cache::<String, u64>::builder()
///     .capacity(500)
///     .ttl(Duration::from_secs(30))
///     .sweep_multiplier(4)
///     .promotion(Promotion::NoPromotion)
///     .build_sync()
///     .unwrap();
///
/// cache.set("answer".to_string(), 42);
/// assert_eq!(cache.get("answer"), Ok(42));
/// ```
#[derive(Debug)]
pub struct CacheBuilder<K, V> {
    settings: CacheSettings,
    promotion: Promotion<K, V>,
    clock: Arc<dyn Clock>,
}

impl<K, V> CacheBuilder<K, V>
where
    K: Hash + Eq + Clone,
{
    pub fn new() -> Self {
        Self {
            settings: CacheSettings::default(),
            promotion: Promotion::default(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces all settings at once.
    pub fn settings(mut self, settings: CacheSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn capacity(mut self, capacity: usize) -> Self {
        self.settings.capacity = capacity;
        self
    }

    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.settings.ttl = Some(ttl);
        self
    }

    pub fn sweep_multiplier(mut self, multiplier: u32) -> Self {
        self.settings.sweep_multiplier = multiplier;
        self
    }

    pub fn promotion(mut self, promotion: Promotion<K, V>) -> Self {
        self.promotion = promotion;
        self
    }

    /// Installs a custom read-hit strategy.
    pub fn promote_with<S>(self, strategy: S) -> Self
    where
        S: PromotionStrategy<K, V> + 'static,
    {
        self.promotion(Promotion::custom(strategy))
    }

    pub fn clock<C>(mut self, clock: C) -> Self
    where
        C: Clock + 'static,
    {
        self.clock = Arc::new(clock);
        self
    }

    /// Builds an unsynchronized cache.
    ///
    /// # Errors
    /// [`CacheError::InvalidConfiguration`] when the settings are rejected.
    pub fn build(self) -> Result<Cache<K, V>> {
        Cache::from_parts(self.settings, self.promotion, self.clock)
    }

    /// Builds a cache wrapped in a [`SyncCache`].
    pub fn build_sync(self) -> Result<SyncCache<K, V>> {
        self.build().map(SyncCache::new)
    }
}

impl<K, V> Default for CacheBuilder<K, V>
where
    K: Hash + Eq + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
