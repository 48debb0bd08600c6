//! Commit database
//!
//! Append-only store of immutable commits keyed by hash. Commits are only ever
//! removed by garbage collection.

use crate::artifacts::objects::commit::{Commit, SlimCommit};
use crate::artifacts::objects::object_id::ObjectId;
use crate::error::{Result, VcsError};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct Database {
    commits: HashMap<ObjectId, Commit>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a commit, returning its hash
    ///
    /// A commit with the same hash is never overwritten.
    pub fn store(&mut self, commit: Commit) -> ObjectId {
        let oid = commit.hash().clone();
        self.commits.entry(oid.clone()).or_insert(commit);
        oid
    }

    pub fn load(&self, object_id: &ObjectId) -> Option<&Commit> {
        self.commits.get(object_id)
    }

    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> Result<&Commit> {
        self.load(object_id)
            .ok_or_else(|| VcsError::InvalidCommitHash(object_id.to_string()))
    }

    pub fn slim_commit(&self, object_id: &ObjectId) -> Option<SlimCommit> {
        self.load(object_id).map(Commit::slim)
    }

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.commits.contains_key(object_id)
    }

    pub(crate) fn remove(&mut self, object_id: &ObjectId) -> Option<Commit> {
        self.commits.remove(object_id)
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// Hashes starting with `prefix`, sorted
    pub fn find_by_prefix(&self, prefix: &str) -> Vec<ObjectId> {
        let mut matches = self
            .commits
            .keys()
            .filter(|oid| oid.has_prefix(prefix))
            .cloned()
            .collect::<Vec<_>>();
        matches.sort();
        matches
    }

    /// All commits, oldest first
    pub fn commits_by_age(&self) -> Vec<&Commit> {
        let mut commits = self.commits.values().collect::<Vec<_>>();
        commits.sort_by(|a, b| {
            a.timestamp()
                .cmp(&b.timestamp())
                .then_with(|| a.hash().cmp(b.hash()))
        });
        commits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::commit::Author;
    use crate::areas::working_tree::WorkingTree;
    use chrono::{TimeZone, Utc};

    fn commit_at(seconds: i64, parent: Option<ObjectId>) -> Commit {
        let author = Author::new(
            "system".into(),
            "system@localhost".into(),
            Utc.timestamp_opt(seconds, 0).unwrap(),
        );
        Commit::new(parent, author, format!("at {seconds}"), vec![], WorkingTree::new().tree_hash())
    }

    #[test]
    fn stores_and_loads_commits() {
        let mut database = Database::new();
        let oid = database.store(commit_at(1, None));

        assert!(database.contains(&oid));
        assert_eq!(database.parse_object_as_commit(&oid).unwrap().message(), "at 1");
        assert!(matches!(
            database.parse_object_as_commit(&ObjectId::from_digest(&[0; 20])),
            Err(VcsError::InvalidCommitHash(_))
        ));
    }

    #[test]
    fn lists_commits_oldest_first() {
        let mut database = Database::new();
        let root = database.store(commit_at(5, None));
        let child = database.store(commit_at(9, Some(root.clone())));
        database.store(commit_at(7, None));

        let order = database
            .commits_by_age()
            .into_iter()
            .map(|c| c.timestamp().timestamp())
            .collect::<Vec<_>>();
        assert_eq!(order, vec![5, 7, 9]);
        assert_eq!(database.slim_commit(&child).unwrap().parent, Some(root));
    }

    #[test]
    fn finds_hashes_by_prefix() {
        let mut database = Database::new();
        let oid = database.store(commit_at(1, None));

        assert_eq!(database.find_by_prefix(&oid.to_short_oid()), vec![oid.clone()]);
        assert_eq!(database.find_by_prefix(oid.as_ref()).len(), 1);
    }
}
