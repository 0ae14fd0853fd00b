//! Key Snapshot Module
//!
//! Point-in-time copy of the cache's key order.

use std::ops::Deref;
use std::sync::Arc;

// == Key Snapshot ==
/// Keys as they were ordered (oldest to newest) when the snapshot was taken.
///
/// Later writes to the cache are never visible through a snapshot. Iterating
/// does not consume it, so the same snapshot can be walked any number of
/// times, and clones share one allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySnapshot<K> {
    keys: Arc<[K]>,
}

impl<K> KeySnapshot<K> {
    pub(crate) fn new(keys: Vec<K>) -> Self {
        Self { keys: keys.into() }
    }

    /// Iterates keys oldest to newest.
    pub fn iter(&self) -> std::slice::Iter<'_, K> {
        self.keys.iter()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<K> Deref for KeySnapshot<K> {
    type Target = [K];

    fn deref(&self) -> &Self::Target {
        &self.keys
    }
}

impl<'a, K> IntoIterator for &'a KeySnapshot<K> {
    type Item = &'a K;
    type IntoIter = std::slice::Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_is_restartable() {
        let snapshot = KeySnapshot::new(vec![1, 2, 3]);

        let first: Vec<i32> = snapshot.iter().copied().collect();
        let second: Vec<i32> = (&snapshot).into_iter().copied().collect();

        assert_eq!(first, vec![1, 2, 3]);
        assert_eq!(first, second);
        assert_eq!(snapshot.len(), 3);
    }

    #[test]
    fn test_snapshot_clones_share_keys() {
        let snapshot = KeySnapshot::new(vec!["a".to_string()]);
        let copy = snapshot.clone();

        assert_eq!(snapshot, copy);
        assert_eq!(&copy[..], &["a".to_string()]);
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot: KeySnapshot<u8> = KeySnapshot::new(Vec::new());
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.iter().next(), None);
    }
}
