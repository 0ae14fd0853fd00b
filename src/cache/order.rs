//! Recency List Module
//!
//! Arena-backed doubly linked list recording insertion/promotion order.

use generational_arena::{Arena, Index};

#[derive(Debug)]
struct Node<K> {
    key: K,
    prev: Option<Index>,
    next: Option<Index>,
}

// == Recency List ==
/// Tracks key order for eviction.
///
/// Nodes live in an arena and are addressed by [`Index`], so every
/// operation that already holds an index runs in O(1):
/// - Head = oldest
/// - Tail = newest
#[derive(Debug)]
pub struct RecencyList<K> {
    nodes: Arena<Node<K>>,
    head: Option<Index>,
    tail: Option<Index>,
}

impl<K> RecencyList<K> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
            head: None,
            tail: None,
        }
    }

    // Detaches a node from its neighbours without freeing it.
    fn unlink(&mut self, index: Index) {
        let (prev, next) = {
            let node = &self.nodes[index];
            (node.prev, node.next)
        };

        match prev {
            Some(prev) => self.nodes[prev].next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.nodes[next].prev = prev,
            None => self.tail = prev,
        }
    }

    // Attaches an already allocated node at the newest end.
    fn link_back(&mut self, index: Index) {
        let old_tail = self.tail;
        {
            let node = &mut self.nodes[index];
            node.prev = old_tail;
            node.next = None;
        }
        match old_tail {
            Some(tail) => self.nodes[tail].next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
    }

    // == Push Back ==
    /// Appends a key at the newest end and returns its handle.
    pub fn push_back(&mut self, key: K) -> Index {
        let index = self.nodes.insert(Node {
            key,
            prev: None,
            next: None,
        });
        self.link_back(index);
        index
    }

    // == Move To Back ==
    /// Moves an existing node to the newest end.
    pub fn move_to_back(&mut self, index: Index) {
        if self.tail == Some(index) || !self.nodes.contains(index) {
            return;
        }
        self.unlink(index);
        self.link_back(index);
    }

    // == Remove ==
    /// Removes a node, returning its key if the handle was live.
    pub fn remove(&mut self, index: Index) -> Option<K> {
        if !self.nodes.contains(index) {
            return None;
        }
        self.unlink(index);
        self.nodes.remove(index).map(|node| node.key)
    }

    // == Pop Front ==
    /// Removes and returns the oldest key.
    pub fn pop_front(&mut self) -> Option<K> {
        let head = self.head?;
        self.remove(head)
    }

    // == Peek Front ==
    /// Returns the oldest key without removing it.
    pub fn front(&self) -> Option<&K> {
        self.head.map(|index| &self.nodes[index].key)
    }

    /// Iterates keys oldest to newest.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }
}

impl<K> Default for RecencyList<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Oldest-to-newest iterator over a [`RecencyList`].
pub struct Iter<'a, K> {
    list: &'a RecencyList<K>,
    cursor: Option<Index>,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor?;
        let node = &self.list.nodes[index];
        self.cursor = node.next;
        Some(&node.key)
    }
}
