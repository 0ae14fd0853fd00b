//! Promotion Strategy Module
//!
//! What happens to an entry after a successful read.

use std::fmt;
use std::time::Instant;

use crate::cache::OrderedStore;

// == Promotion Strategy Trait ==
/// Extension point for custom read-hit behavior.
///
/// Called with the cache lock held (when synchronized), after the entry has
/// passed its lazy expiry check. `fresh_expiry` is the expiry a write at the
/// current instant would receive.
pub trait PromotionStrategy<K, V>: Send + Sync {
    fn promote(
        &self,
        store: &mut OrderedStore<K, V>,
        key: &K,
        value: &V,
        fresh_expiry: Option<Instant>,
    );
}

impl<K, V, F> PromotionStrategy<K, V> for F
where
    F: Fn(&mut OrderedStore<K, V>, &K, &V) + Send + Sync,
{
    fn promote(
        &self,
        store: &mut OrderedStore<K, V>,
        key: &K,
        value: &V,
        _fresh_expiry: Option<Instant>,
    ) {
        self(store, key, value)
    }
}

// == Promotion ==
/// Read-hit behavior of a cache.
pub enum Promotion<K, V> {
    /// Move the key to the newest position and restart its TTL (sliding
    /// expiration). This is the default.
    PromoteToNewest,
    /// Leave order and expiry untouched, giving pure FIFO eviction.
    NoPromotion,
    /// User supplied behavior.
    Custom(Box<dyn PromotionStrategy<K, V>>),
}

impl<K, V> Promotion<K, V>
where
    K: std::hash::Hash + Eq + Clone,
{
    /// Wraps a custom strategy, typically a closure
    /// `|store, key, value| { ... }`.
    pub fn custom<S>(strategy: S) -> Self
    where
        S: PromotionStrategy<K, V> + 'static,
    {
        Promotion::Custom(Box::new(strategy))
    }

    // == Apply ==
    /// Runs the strategy for a read hit on `key`.
    pub fn apply(
        &self,
        store: &mut OrderedStore<K, V>,
        key: &K,
        value: &V,
        fresh_expiry: Option<Instant>,
    ) {
        match self {
            Promotion::PromoteToNewest => {
                store.refresh(key, fresh_expiry);
            }
            Promotion::NoPromotion => {}
            Promotion::Custom(strategy) => strategy.promote(store, key, value, fresh_expiry),
        }
    }
}

impl<K, V> Default for Promotion<K, V> {
    fn default() -> Self {
        Promotion::PromoteToNewest
    }
}

impl<K, V> fmt::Debug for Promotion<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Promotion::PromoteToNewest => f.write_str("PromoteToNewest"),
            Promotion::NoPromotion => f.write_str("NoPromotion"),
            Promotion::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheEntry;
    use std::time::Duration;

    fn filled_store(now: Instant) -> OrderedStore<u32, &'static str> {
        let mut store = OrderedStore::new();
        store.insert(1, CacheEntry::new("a", Some(now)));
        store.insert(2, CacheEntry::new("b", Some(now)));
        store.insert(3, CacheEntry::new("c", Some(now)));
        store
    }

    fn order(store: &OrderedStore<u32, &'static str>) -> Vec<u32> {
        store.keys().copied().collect()
    }

    #[test]
    fn test_promote_to_newest_moves_and_refreshes() {
        let now = Instant::now();
        let mut store = filled_store(now);
        let fresh = Some(now + Duration::from_secs(60));

        Promotion::PromoteToNewest.apply(&mut store, &1, &"a", fresh);

        assert_eq!(order(&store), vec![2, 3, 1]);
        assert_eq!(store.get(&1).and_then(|e| e.expires_at), fresh);
    }

    #[test]
    fn test_no_promotion_is_inert() {
        let now = Instant::now();
        let mut store = filled_store(now);

        Promotion::NoPromotion.apply(&mut store, &1, &"a", Some(now + Duration::from_secs(60)));

        assert_eq!(order(&store), vec![1, 2, 3]);
        assert_eq!(store.get(&1).and_then(|e| e.expires_at), Some(now));
    }

    #[test]
    fn test_custom_closure_receives_key_and_value() {
        let now = Instant::now();
        let mut store = filled_store(now);

        // Moves the hit key to the newest end without refreshing its expiry
        let promotion = Promotion::custom(
            |store: &mut OrderedStore<u32, &'static str>, key: &u32, value: &&'static str| {
                assert_eq!(*value, "b");
                store.move_to_newest(key);
            },
        );
        promotion.apply(&mut store, &2, &"b", Some(now + Duration::from_secs(60)));

        assert_eq!(order(&store), vec![1, 3, 2]);
        assert_eq!(store.get(&2).and_then(|e| e.expires_at), Some(now));
    }

    #[test]
    fn test_default_and_debug() {
        let promotion: Promotion<u32, u32> = Promotion::default();
        assert!(matches!(promotion, Promotion::PromoteToNewest));
        assert_eq!(format!("{:?}", promotion), "PromoteToNewest");
    }
}
