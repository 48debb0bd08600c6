//! Stash stack
//!
//! A bounded LIFO of staged-but-uncommitted change sets. Index 0 is the most recent
//! entry. Pushing past the capacity drops the oldest entry.

use crate::artifacts::core::{ContentHasher, timestamp_key};
use crate::artifacts::objects::change::Change;
use crate::artifacts::objects::object_id::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stash {
    pub id: ObjectId,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub changes: Vec<Change>,
    /// Branch checked out when the stash was saved; `None` when HEAD was detached
    pub originating_branch: Option<String>,
}

impl Stash {
    pub fn new(
        message: String,
        timestamp: DateTime<Utc>,
        changes: Vec<Change>,
        originating_branch: Option<String>,
    ) -> Self {
        let id = ContentHasher::new()
            .update("stash")
            .update(&message)
            .update(timestamp_key(&timestamp))
            .finish();

        Stash {
            id,
            message,
            timestamp,
            changes,
            originating_branch,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StashStack {
    entries: VecDeque<Stash>,
    capacity: usize,
}

impl StashStack {
    pub fn new(capacity: usize) -> Self {
        StashStack {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Push a stash on top, returning entries dropped to stay within capacity
    pub fn push(&mut self, stash: Stash) -> Vec<Stash> {
        self.entries.push_front(stash);
        self.trim()
    }

    pub fn pop(&mut self, index: usize) -> Option<Stash> {
        self.entries.remove(index)
    }

    pub fn get(&self, index: usize) -> Option<&Stash> {
        self.entries.get(index)
    }

    pub fn list(&self) -> impl Iterator<Item = &Stash> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn set_capacity(&mut self, capacity: usize) -> Vec<Stash> {
        self.capacity = capacity.max(1);
        self.trim()
    }

    /// Drop the oldest entries past capacity
    pub fn trim(&mut self) -> Vec<Stash> {
        let keep = self.capacity.min(self.entries.len());
        self.entries.split_off(keep).into()
    }

    /// How many entries `trim` would drop
    pub fn overflow(&self) -> usize {
        self.entries.len().saturating_sub(self.capacity)
    }

    pub(crate) fn replace(&mut self, entries: impl IntoIterator<Item = Stash>) {
        self.entries = entries.into_iter().collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    fn stash(n: i64) -> Stash {
        let ts = DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(n);
        Stash::new(format!("stash {n}"), ts, vec![], Some("main".into()))
    }

    #[test]
    fn newest_entry_is_index_zero() {
        let mut stack = StashStack::new(5);
        stack.push(stash(1));
        stack.push(stash(2));

        assert_eq!(stack.get(0).unwrap().message, "stash 2");
        assert_eq!(stack.pop(1).unwrap().message, "stash 1");
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn drops_oldest_past_capacity() {
        let mut stack = StashStack::new(2);
        stack.push(stash(1));
        stack.push(stash(2));
        let dropped = stack.push(stash(3));

        assert_eq!(dropped.len(), 1);
        assert_eq!(dropped[0].message, "stash 1");
        let messages = stack.list().map(|s| s.message.as_str()).collect::<Vec<_>>();
        assert_eq!(messages, vec!["stash 3", "stash 2"]);
    }

    #[test]
    fn ids_depend_on_message_and_time() {
        assert_ne!(stash(1).id, stash(2).id);
        assert_eq!(stash(1).id, stash(1).id);
    }
}
