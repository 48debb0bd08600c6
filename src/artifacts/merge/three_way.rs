//! Three-way merge planning
//!
//! Given the trees at the common ancestor (base), the current HEAD (ours) and the
//! merged-in commit (theirs), decide for every key present on either side:
//!
//! | ours vs theirs | ours vs base | theirs vs base | outcome        |
//! |----------------|--------------|----------------|----------------|
//! | equal          |              |                | keep           |
//! | differ         | equal        |                | take theirs    |
//! | differ         |              | equal          | keep ours      |
//! | differ         | differ       | differ         | conflict       |
//!
//! The `ours` and `theirs` strategies skip conflict detection and take the named
//! side's value for every key where the two sides differ. Keys are visited in
//! `(locale, key)` order, so the same inputs always yield the same plan.

use crate::areas::working_tree::WorkingTree;
use crate::artifacts::merge::conflict::Conflict;
use crate::artifacts::objects::change::{Change, TranslationKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeStrategy {
    #[default]
    Recursive,
    Ours,
    Theirs,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergePlan {
    /// Changes to apply on top of ours
    pub changes: Vec<Change>,
    pub conflicts: Vec<Conflict>,
}

impl MergePlan {
    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty()
    }
}

#[derive(Debug)]
pub struct ThreeWayMerge<'t> {
    base: &'t WorkingTree,
    ours: &'t WorkingTree,
    theirs: &'t WorkingTree,
}

impl<'t> ThreeWayMerge<'t> {
    pub fn new(base: &'t WorkingTree, ours: &'t WorkingTree, theirs: &'t WorkingTree) -> Self {
        ThreeWayMerge { base, ours, theirs }
    }

    /// Plan the merge
    ///
    /// `timestamps` supplies the (ours, theirs) time of the last change to a
    /// conflicting key; it is only called for conflicts.
    pub fn plan<F>(&self, strategy: MergeStrategy, timestamps: F) -> MergePlan
    where
        F: Fn(&TranslationKey) -> (DateTime<Utc>, DateTime<Utc>),
    {
        let keys = self
            .ours
            .entries()
            .chain(self.theirs.entries())
            .map(|(key, _)| key)
            .collect::<BTreeSet<_>>();

        let mut plan = MergePlan::default();

        for key in keys {
            let ours = self.ours.get(&key.locale, &key.key);
            let theirs = self.theirs.get(&key.locale, &key.key);
            if ours == theirs {
                continue;
            }
            let base = self.base.get(&key.locale, &key.key);

            let take_theirs = match strategy {
                MergeStrategy::Ours => false,
                MergeStrategy::Theirs => true,
                MergeStrategy::Recursive if ours == base => true,
                MergeStrategy::Recursive if theirs == base => false,
                MergeStrategy::Recursive => {
                    let (ours_timestamp, theirs_timestamp) = timestamps(&key);
                    plan.conflicts.push(Conflict {
                        locale: key.locale.clone(),
                        key: key.key.clone(),
                        ours_value: ours.map(str::to_string),
                        theirs_value: theirs.map(str::to_string),
                        base_value: base.map(str::to_string),
                        ours_timestamp,
                        theirs_timestamp,
                        resolved: false,
                        resolution: None,
                        merged_value: None,
                    });
                    false
                }
            };

            if take_theirs {
                plan.changes.extend(Change::between(
                    &key.locale,
                    &key.key,
                    ours.map(str::to_string),
                    theirs.map(str::to_string),
                ));
            }
        }

        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::change::ChangeType;
    use pretty_assertions::assert_eq;

    fn tree(entries: &[(&str, &str)]) -> WorkingTree {
        let mut tree = WorkingTree::new();
        for (key, value) in entries {
            tree.set("en", key, value.to_string());
        }
        tree
    }

    fn no_timestamps(_: &TranslationKey) -> (DateTime<Utc>, DateTime<Utc>) {
        (DateTime::<Utc>::UNIX_EPOCH, DateTime::<Utc>::UNIX_EPOCH)
    }

    #[test]
    fn disjoint_edits_merge_cleanly() {
        let base = tree(&[("hello", "Hi")]);
        let ours = tree(&[("hello", "Hi"), ("bye", "Bye")]);
        let theirs = tree(&[("hello", "Hey")]);

        let plan = ThreeWayMerge::new(&base, &ours, &theirs)
            .plan(MergeStrategy::Recursive, no_timestamps);

        assert!(plan.is_clean());
        assert_eq!(plan.changes.len(), 1);
        assert_eq!(plan.changes[0].key, "hello");
        assert_eq!(plan.changes[0].new_value.as_deref(), Some("Hey"));
    }

    #[test]
    fn deletion_on_their_side_is_taken() {
        let base = tree(&[("hello", "Hi"), ("bye", "Bye")]);
        let ours = base.clone();
        let theirs = tree(&[("hello", "Hi")]);

        let plan = ThreeWayMerge::new(&base, &ours, &theirs)
            .plan(MergeStrategy::Recursive, no_timestamps);

        assert_eq!(plan.changes.len(), 1);
        assert_eq!(plan.changes[0].change_type, ChangeType::Delete);
    }

    #[test]
    fn divergent_edits_conflict() {
        let base = tree(&[("hello", "Hi")]);
        let ours = tree(&[("hello", "Hello")]);
        let theirs = tree(&[("hello", "Hey")]);

        let plan = ThreeWayMerge::new(&base, &ours, &theirs)
            .plan(MergeStrategy::Recursive, no_timestamps);

        assert!(plan.changes.is_empty());
        assert_eq!(plan.conflicts.len(), 1);
        let conflict = &plan.conflicts[0];
        assert_eq!(conflict.base_value.as_deref(), Some("Hi"));
        assert_eq!(conflict.ours_value.as_deref(), Some("Hello"));
        assert_eq!(conflict.theirs_value.as_deref(), Some("Hey"));
    }

    #[test]
    fn empty_base_conflicts_on_independent_adds() {
        let base = WorkingTree::new();
        let ours = tree(&[("hello", "Hello")]);
        let theirs = tree(&[("hello", "Hey"), ("bye", "Bye")]);

        let plan = ThreeWayMerge::new(&base, &ours, &theirs)
            .plan(MergeStrategy::Recursive, no_timestamps);

        assert_eq!(plan.conflicts.len(), 1);
        assert_eq!(plan.changes.len(), 1);
        assert_eq!(plan.changes[0].key, "bye");
    }

    #[test]
    fn side_strategies_take_the_named_side_everywhere() {
        let base = tree(&[("hello", "Hi"), ("bye", "Bye")]);
        let ours = tree(&[("hello", "Hello"), ("bye", "Bye"), ("only_ours", "x")]);
        let theirs = tree(&[("hello", "Hey"), ("bye", "Ciao")]);
        let merge = ThreeWayMerge::new(&base, &ours, &theirs);

        let keep_ours = merge.plan(MergeStrategy::Ours, no_timestamps);
        assert!(keep_ours.is_clean());
        assert!(keep_ours.changes.is_empty());

        let take_theirs = merge.plan(MergeStrategy::Theirs, no_timestamps);
        assert!(take_theirs.is_clean());
        let summary = take_theirs
            .changes
            .iter()
            .map(|c| format!("{} {}", c.change_type.status_char(), c.key))
            .collect::<Vec<_>>();
        assert_eq!(summary, vec!["M bye", "M hello", "D only_ours"]);
    }

    #[test]
    fn plans_are_deterministic() {
        let base = tree(&[("a", "1"), ("b", "1"), ("c", "1")]);
        let ours = tree(&[("a", "2"), ("b", "2"), ("c", "1")]);
        let theirs = tree(&[("a", "3"), ("b", "3"), ("c", "3")]);
        let merge = ThreeWayMerge::new(&base, &ours, &theirs);

        let first = merge.plan(MergeStrategy::Recursive, no_timestamps);
        for _ in 0..5 {
            assert_eq!(merge.plan(MergeStrategy::Recursive, no_timestamps), first);
        }
    }
}
