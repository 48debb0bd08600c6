use crate::areas::working_tree::WorkingTree;
use crate::artifacts::objects::change::{Change, ChangeType};
use bitflags::bitflags;
use std::collections::BTreeSet;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct DiffFilter: u32 {
        const ADDED = 0b0001;
        const DELETED = 0b0010;
        const MODIFIED = 0b0100;
    }
}

impl DiffFilter {
    pub fn try_parse(s: &str) -> Option<Self> {
        let mut filter = Self::empty();

        for c in s.chars() {
            match c {
                'A' => filter |= Self::ADDED,
                'D' => filter |= Self::DELETED,
                'M' => filter |= Self::MODIFIED,
                _ => return None,
            }
        }

        Some(filter)
    }

    pub fn matches(&self, change: &Change) -> bool {
        match change.change_type {
            ChangeType::Add => self.contains(DiffFilter::ADDED),
            ChangeType::Delete => self.contains(DiffFilter::DELETED),
            ChangeType::Modify => self.contains(DiffFilter::MODIFIED),
        }
    }
}

/// Flat key-level comparison of two trees
#[derive(Debug)]
pub struct TreeDiff<'t> {
    old: &'t WorkingTree,
    new: &'t WorkingTree,
}

impl<'t> TreeDiff<'t> {
    pub fn new(old: &'t WorkingTree, new: &'t WorkingTree) -> Self {
        TreeDiff { old, new }
    }

    /// Every add/modify/delete turning `old` into `new`, in `(locale, key)` order
    pub fn changes(&self) -> Vec<Change> {
        self.filtered(DiffFilter::all())
    }

    pub fn filtered(&self, filter: DiffFilter) -> Vec<Change> {
        let keys = self
            .old
            .entries()
            .chain(self.new.entries())
            .map(|(key, _)| key)
            .collect::<BTreeSet<_>>();

        keys.into_iter()
            .filter_map(|key| {
                Change::between(
                    &key.locale,
                    &key.key,
                    self.old.get(&key.locale, &key.key).map(str::to_string),
                    self.new.get(&key.locale, &key.key).map(str::to_string),
                )
            })
            .filter(|change| filter.matches(change))
            .collect()
    }
}
