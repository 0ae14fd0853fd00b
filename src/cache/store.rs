//! Ordered Store Module
//!
//! HashMap storage combined with a recency list, giving a key-value map that
//! remembers insertion/promotion order.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::Instant;

use generational_arena::Index;

use crate::cache::order::{self, RecencyList};
use crate::cache::CacheEntry;

#[derive(Debug)]
struct Slot<V> {
    entry: CacheEntry<V>,
    index: Index,
}

// == Ordered Store ==
/// Insertion-ordered mapping from key to [`CacheEntry`].
///
/// Lookup, append, removal and popping the oldest entry are all O(1).
/// Re-inserting an existing key removes it first, so the key always lands at
/// the newest end.
#[derive(Debug)]
pub struct OrderedStore<K, V> {
    /// Key-value storage
    entries: HashMap<K, Slot<V>>,
    /// Oldest-first key order
    order: RecencyList<K>,
}

impl<K, V> OrderedStore<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            order: RecencyList::new(),
        }
    }

    /// Creates an empty store with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
            order: RecencyList::new(),
        }
    }

    // == Get ==
    /// Returns the entry stored under `key`, without touching its position.
    pub fn get<Q>(&self, key: &Q) -> Option<&CacheEntry<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key).map(|slot| &slot.entry)
    }

    /// Returns the stored key alongside its entry.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &CacheEntry<V>)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries
            .get_key_value(key)
            .map(|(key, slot)| (key, &slot.entry))
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    // == Insert ==
    /// Writes `entry` under `key` at the newest position.
    ///
    /// An existing entry for the same key is removed first and returned.
    pub fn insert(&mut self, key: K, entry: CacheEntry<V>) -> Option<CacheEntry<V>> {
        let previous = self.remove(&key);
        let index = self.order.push_back(key.clone());
        self.entries.insert(key, Slot { entry, index });
        previous
    }

    // == Remove ==
    /// Removes the entry for `key`, returning it if it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<CacheEntry<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.entries.remove(key)?;
        self.order.remove(slot.index);
        Some(slot.entry)
    }

    // == Move To Newest ==
    /// Relocates `key` to the newest position, leaving its entry untouched.
    ///
    /// Returns false when the key is absent.
    pub fn move_to_newest<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.entries.get(key) {
            Some(slot) => {
                self.order.move_to_back(slot.index);
                true
            }
            None => false,
        }
    }

    // == Refresh ==
    /// Relocates `key` to the newest position and replaces its expiry.
    ///
    /// Equivalent to removing and re-inserting the same value.
    pub fn refresh<Q>(&mut self, key: &Q, expires_at: Option<Instant>) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.entries.get_mut(key) {
            Some(slot) => {
                slot.entry.expires_at = expires_at;
                self.order.move_to_back(slot.index);
                true
            }
            None => false,
        }
    }

    // == Pop Oldest ==
    /// Removes and returns the oldest entry.
    pub fn pop_oldest(&mut self) -> Option<(K, CacheEntry<V>)> {
        let key = self.order.pop_front()?;
        let slot = self.entries.remove(&key)?;
        Some((key, slot.entry))
    }

    /// Returns the oldest key without removing it.
    pub fn oldest_key(&self) -> Option<&K> {
        self.order.front()
    }

    // == Remove Where ==
    /// Removes every entry matching `predicate`, walking oldest to newest.
    ///
    /// Returns the number of entries removed.
    pub fn remove_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&K, &CacheEntry<V>) -> bool,
    {
        let doomed: Vec<K> = self
            .iter()
            .filter(|(key, entry)| predicate(key, entry))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &doomed {
            self.remove(key);
        }
        doomed.len()
    }

    /// Iterates keys oldest to newest.
    pub fn keys(&self) -> order::Iter<'_, K> {
        self.order.iter()
    }

    /// Iterates `(key, entry)` pairs oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &CacheEntry<V>)> + '_ {
        self.order.iter().filter_map(move |key| {
            self.entries.get(key).map(|slot| (key, &slot.entry))
        })
    }

    // == Length ==
    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

impl<K, V> Default for OrderedStore<K, V>
where
    K: Hash + Eq + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
