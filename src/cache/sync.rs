//! Synchronized Cache Module
//!
//! Wraps a [`Cache`] in a single mutex so it can be shared across threads.

use std::borrow::Borrow;
use std::hash::Hash;
use std::time::Duration;

use parking_lot::Mutex;

use crate::cache::{Cache, CacheSettings, KeySnapshot};
use crate::error::Result;

// == Sync Cache ==
/// Thread-safe cache.
///
/// Every operation locks, delegates to the inner [`Cache`], and unlocks when
/// the guard drops, including on error returns. Lazy expiry, sweeps, eviction
/// and promotion all happen inside the critical section, so effects are
/// totally ordered by lock acquisition. Each instance owns its own lock.
#[derive(Debug)]
pub struct SyncCache<K, V> {
    inner: Mutex<Cache<K, V>>,
}

impl<K, V> SyncCache<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructors ==
    /// Wraps an existing cache.
    pub fn new(cache: Cache<K, V>) -> Self {
        Self {
            inner: Mutex::new(cache),
        }
    }

    /// Creates a synchronized cache from settings with default promotion.
    pub fn with_settings(settings: CacheSettings) -> Result<Self> {
        Cache::with_settings(settings).map(Self::new)
    }

    // == Operations ==
    pub fn set(&self, key: K, value: V) {
        self.inner.lock().set(key, value)
    }

    pub fn get<Q>(&self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.inner.lock().get(key)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().contains(key)
    }

    pub fn delete<Q>(&self, key: &Q) -> Result<()>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().delete(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Snapshots the key order under the lock.
    pub fn keys(&self) -> KeySnapshot<K> {
        self.inner.lock().keys()
    }

    pub fn time_to_live<Q>(&self, key: &Q) -> Option<Duration>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().time_to_live(key)
    }

    pub fn purge_expired(&self) -> usize {
        self.inner.lock().purge_expired()
    }

    pub fn clear(&self) {
        self.inner.lock().clear()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.inner.lock().ttl()
    }

    // == With Lock ==
    /// Runs `f` against the inner cache while holding the lock.
    ///
    /// Useful for compound reads that must observe one consistent state.
    pub fn with_lock<R>(&self, f: impl FnOnce(&mut Cache<K, V>) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Unwraps the inner cache.
    pub fn into_inner(self) -> Cache<K, V> {
        self.inner.into_inner()
    }
}

impl<K, V> From<Cache<K, V>> for SyncCache<K, V>
where
    K: Hash + Eq + Clone,
{
    fn from(cache: Cache<K, V>) -> Self {
        Self::new(cache)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use crate::error::CacheError;
    use std::sync::Arc;
    use std::thread;

    fn sync_cache(capacity: usize) -> SyncCache<u64, String> {
        SyncCache::with_settings(CacheSettings::with_capacity(capacity)).unwrap()
    }

    #[test]
    fn test_sync_basic_operations() {
        let cache = sync_cache(3);
        cache.set(1, "a".to_string());
        cache.set(2, "b".to_string());
        cache.set(3, "c".to_string());
        cache.set(4, "d".to_string());

        assert_eq!(cache.len(), 3);
        assert!(!cache.contains(&1));
        assert_eq!(cache.get(&4), Ok("d".to_string()));
        assert_eq!(cache.delete(&4), Ok(()));
        assert_eq!(cache.delete(&4), Err(CacheError::NotFound));
    }

    #[test]
    fn test_failed_get_releases_lock() {
        let cache = sync_cache(3);

        assert_eq!(cache.get(&42), Err(CacheError::NotFound));
        // Would deadlock if the failed call kept the lock
        cache.set(42, "x".to_string());
        assert!(cache.contains(&42));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let result = SyncCache::<u64, u64>::with_settings(CacheSettings::with_capacity(0));
        assert!(matches!(result, Err(CacheError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_concurrent_distinct_writers_fill_capacity() {
        const CAPACITY: usize = 400;
        const THREADS: u64 = 8;
        let per_thread = CAPACITY as u64 / THREADS;

        let cache = Arc::new(sync_cache(CAPACITY));
        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..per_thread {
                        let key = t * per_thread + i;
                        cache.set(key, format!("value_{}", key));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("writer thread panicked");
        }

        assert_eq!(cache.len(), CAPACITY);
        let mut keys: Vec<u64> = cache.keys().iter().copied().collect();
        keys.sort_unstable();
        assert_eq!(keys, (0..CAPACITY as u64).collect::<Vec<_>>());
        for key in 0..CAPACITY as u64 {
            assert_eq!(cache.get(&key), Ok(format!("value_{}", key)));
        }
    }

    #[test]
    fn test_concurrent_overflow_respects_capacity() {
        let cache = Arc::new(sync_cache(50));
        let handles: Vec<_> = (0..4u64)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..500u64 {
                        let key = t * 1000 + i;
                        cache.set(key, key.to_string());
                        let _ = cache.get(&key);
                        assert!(cache.len() <= 50);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("worker thread panicked");
        }
        assert_eq!(cache.len(), 50);
    }

    #[test]
    fn test_instances_do_not_share_state() {
        let first = sync_cache(2);
        let second = sync_cache(2);

        first.set(1, "a".to_string());
        assert!(!second.contains(&1));

        // Holding one instance's lock does not block the other
        first.with_lock(|_| {
            second.set(2, "b".to_string());
        });
        assert!(second.contains(&2));
    }

    #[test]
    fn test_with_lock_sees_consistent_state() {
        let clock = ManualClock::new();
        let cache = Cache::builder()
            .capacity(5)
            .ttl(Duration::from_secs(1))
            .clock(clock.clone())
            .build_sync()
            .unwrap();
        cache.set("k".to_string(), 1u8);

        let (len, capacity, ttl) =
            cache.with_lock(|inner| (inner.len(), inner.capacity(), inner.ttl()));
        assert_eq!((len, capacity, ttl), (1, 5, Some(Duration::from_secs(1))));

        clock.advance(Duration::from_secs(2));
        assert_eq!(cache.get("k"), Err(CacheError::NotFound));
        assert_eq!(cache.time_to_live("k"), None);
    }

    #[test]
    fn test_into_inner() {
        let cache = sync_cache(2);
        cache.set(7, "seven".to_string());

        let mut inner = cache.into_inner();
        assert_eq!(inner.get(&7), Ok("seven".to_string()));
    }
}
