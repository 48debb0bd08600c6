//! Tree reconstruction by replay
//!
//! The tree at a commit is rebuilt from scratch: walk the parent chain from the target
//! to the root, reverse it to chronological order and apply every change into an empty
//! tree. The result depends only on the target commit, never on the current working
//! tree.

use crate::areas::database::Database;
use crate::areas::working_tree::WorkingTree;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::error::{Result, VcsError};

#[derive(Debug)]
pub struct Migration<'d> {
    target: ObjectId,
    /// Commits from the root to the target
    commits: Vec<&'d Commit>,
}

impl<'d> Migration<'d> {
    pub fn plan(database: &'d Database, target: &ObjectId) -> Result<Self> {
        database.parse_object_as_commit(target)?;

        let mut commits = RevList::starting_at(database, target).collect::<Vec<_>>();
        if commits.last().is_some_and(|root| !root.is_root()) {
            // the chain is broken, some ancestor was removed
            let missing = commits
                .last()
                .and_then(|commit| commit.parent())
                .map(ToString::to_string)
                .unwrap_or_default();
            return Err(VcsError::InvalidCommitHash(missing));
        }
        commits.reverse();

        Ok(Migration {
            target: target.clone(),
            commits,
        })
    }

    pub fn target(&self) -> &ObjectId {
        &self.target
    }

    pub fn commits(&self) -> &[&'d Commit] {
        &self.commits
    }

    /// Replay every change into a fresh tree
    pub fn into_tree(self) -> WorkingTree {
        let mut tree = WorkingTree::new();
        self.apply_changes(&mut tree);
        tree
    }

    /// Clear `tree` and replay into it
    pub fn apply_changes(&self, tree: &mut WorkingTree) {
        tree.clear();
        for change in self.commits.iter().flat_map(|commit| commit.changes()) {
            tree.apply(change);
        }
    }
}

/// Tree at `target`, or the empty tree for `None`
pub fn tree_at(database: &Database, target: Option<&ObjectId>) -> Result<WorkingTree> {
    match target {
        Some(oid) => Ok(Migration::plan(database, oid)?.into_tree()),
        None => Ok(WorkingTree::new()),
    }
}
