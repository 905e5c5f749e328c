/*!
 * Ordered Key Queue
 *
 * Keys only; entries live in the state's map. A BTreeMap keyed by the
 * ordering snapshot gives O(log n) pop, and the side index gives O(log n)
 * removal by key. The snapshot is taken at first insertion, so a re-post
 * never moves a key.
 */

use super::comparator::Rank;
use crate::core::limits::DEFAULT_QUEUE_CAPACITY;
use ahash::AHashMap;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Ordering snapshot for one queued key
///
/// `seq` makes keys with identical rank and post time pop in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Slot {
    rank: Rank,
    post_time: u64,
    seq: u64,
}

#[derive(Debug, Clone)]
pub struct KeyQueue {
    order: BTreeMap<Slot, Arc<str>>,
    index: AHashMap<Arc<str>, Slot>,
    next_seq: u64,
}

impl KeyQueue {
    pub fn new() -> Self {
        Self {
            order: BTreeMap::new(),
            index: AHashMap::with_capacity(DEFAULT_QUEUE_CAPACITY),
            next_seq: 0,
        }
    }

    /// Insert a key; returns false (and keeps the existing position) if present
    pub fn push(&mut self, key: Arc<str>, rank: Rank, post_time: u64) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }

        let slot = Slot {
            rank,
            post_time,
            seq: self.next_seq,
        };
        self.next_seq += 1;

        self.index.insert(key.clone(), slot);
        self.order.insert(slot, key);
        true
    }

    /// Remove and return the highest-priority key
    pub fn pop(&mut self) -> Option<Arc<str>> {
        let (_, key) = self.order.pop_first()?;
        self.index.remove(&key);
        Some(key)
    }

    pub fn remove(&mut self, key: &str) -> bool {
        match self.index.remove(key) {
            Some(slot) => {
                self.order.remove(&slot);
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Keys in pop order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<str>> {
        self.order.values()
    }
}

impl Default for KeyQueue {
    fn default() -> Self {
        Self::new()
    }
}
