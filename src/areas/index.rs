//! Staging area (index)
//!
//! The index queues changes that will be sealed into the next commit. It holds at most
//! one change per `locale:key`: staging a second change for the same key folds it into
//! the first, so the staged entry always spans from the committed value to the current
//! one. A pair of changes that cancel out leaves nothing staged.
//!
//! The index is bounded. Once it grows past its capacity the oldest entry is evicted;
//! the evicted value stays in the working tree, it is only no longer staged.

use crate::artifacts::objects::change::{Change, TranslationKey};
use std::collections::{BTreeMap, VecDeque};

#[derive(Debug, Clone)]
pub struct Index {
    /// Staged changes mapped by key
    entries: BTreeMap<TranslationKey, Change>,
    /// Staging order, oldest first
    order: VecDeque<TranslationKey>,
    capacity: usize,
}

impl Index {
    pub fn new(capacity: usize) -> Self {
        Index {
            entries: BTreeMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the capacity, evicting the oldest entries that no longer fit
    pub fn set_capacity(&mut self, capacity: usize) -> Vec<Change> {
        self.capacity = capacity.max(1);
        self.evict_overflow()
    }

    /// Stage a change, replacing any staged change for the same key
    ///
    /// # Returns
    ///
    /// The entries evicted to stay within capacity
    pub fn stage(&mut self, change: Change) -> Vec<Change> {
        let key = change.translation_key();

        let folded = match self.entries.get(&key) {
            Some(existing) => existing.coalesce(&change),
            None => Some(change),
        };

        self.remove_entry(&key);
        if let Some(folded) = folded {
            self.order.push_back(key.clone());
            self.entries.insert(key, folded);
        }

        self.evict_overflow()
    }

    /// Drop the staged change for a key, returning it
    pub fn unstage(&mut self, key: &TranslationKey) -> Option<Change> {
        self.remove_entry(key)
    }

    pub fn entry(&self, key: &TranslationKey) -> Option<&Change> {
        self.entries.get(key)
    }

    /// Staged changes in staging order
    pub fn changes(&self) -> Vec<Change> {
        self.order
            .iter()
            .filter_map(|key| self.entries.get(key))
            .cloned()
            .collect()
    }

    pub fn keys(&self) -> impl Iterator<Item = &TranslationKey> {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear all entries, returning them in staging order
    pub fn clear(&mut self) -> Vec<Change> {
        let drained = self.changes();
        self.entries.clear();
        self.order.clear();
        drained
    }

    fn remove_entry(&mut self, key: &TranslationKey) -> Option<Change> {
        let removed = self.entries.remove(key)?;
        self.order.retain(|k| k != key);
        Some(removed)
    }

    fn evict_overflow(&mut self) -> Vec<Change> {
        let mut evicted = Vec::new();
        while self.entries.len() > self.capacity {
            match self.order.pop_front() {
                Some(oldest) => evicted.extend(self.entries.remove(&oldest)),
                None => break,
            }
        }
        evicted
    }
}
