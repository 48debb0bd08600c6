//! Mark-sweep garbage collection
//!
//! 1. **Mark**: walk parent links from every root (branch heads, tags, HEAD and
//!    remote-tracked heads) and collect the reachable set.
//! 2. **Sweep**: once the store holds more commits than the ceiling, remove unreachable
//!    commits until the count is back at the ceiling. A commit is only removed once no
//!    surviving commit names it as parent, and among those the oldest goes first, so
//!    every kept commit still has its parent. Root commits are never removed.

use crate::areas::database::Database;
use crate::artifacts::objects::object_id::ObjectId;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Statistics from a collection run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GcReport {
    /// Commits removed (or that would be removed on a dry run), in removal order
    pub removed_commits: Vec<ObjectId>,
    pub removed_stashes: usize,
    pub retained: usize,
    pub total_before: usize,
}

impl GcReport {
    pub fn did_collect(&self) -> bool {
        !self.removed_commits.is_empty() || self.removed_stashes > 0
    }
}

/// Every commit reachable from `roots`
pub fn mark(database: &Database, roots: &[ObjectId]) -> HashSet<ObjectId> {
    let mut reachable = HashSet::new();
    let mut queue: Vec<ObjectId> = Vec::new();

    for root in roots {
        if database.contains(root) && reachable.insert(root.clone()) {
            queue.push(root.clone());
        }
    }

    while let Some(oid) = queue.pop() {
        if let Some(parent) = database.load(&oid).and_then(|commit| commit.parent()) {
            if database.contains(parent) && reachable.insert(parent.clone()) {
                queue.push(parent.clone());
            }
        }
    }

    reachable
}

/// Commits a sweep would remove to bring the store down to `ceiling`, in removal order
pub fn plan_sweep(database: &Database, roots: &[ObjectId], ceiling: usize) -> Vec<ObjectId> {
    let excess = database.len().saturating_sub(ceiling);
    if excess == 0 {
        return Vec::new();
    }

    let reachable = mark(database, roots);
    let commits = database.commits_by_age();

    let mut children: HashMap<&ObjectId, usize> = HashMap::new();
    for commit in commits.iter().copied() {
        if let Some(parent) = commit.parent() {
            *children.entry(parent).or_default() += 1;
        }
    }

    let mut candidates = commits
        .into_iter()
        .filter(|commit| !commit.is_root() && !reachable.contains(commit.hash()))
        .collect::<Vec<_>>();
    let mut victims = Vec::new();

    while victims.len() < excess {
        let leaf = candidates
            .iter()
            .position(|commit| children.get(commit.hash()).copied().unwrap_or(0) == 0);
        let Some(position) = leaf else {
            break;
        };

        let victim = candidates.remove(position);
        if let Some(count) = victim.parent().and_then(|parent| children.get_mut(parent)) {
            *count -= 1;
        }
        victims.push(victim.hash().clone());
    }

    tracing::trace!(excess, planned = victims.len(), "planned sweep");
    victims
}

/// Remove the planned commits
pub fn sweep(database: &mut Database, victims: &[ObjectId]) {
    for oid in victims {
        database.remove(oid);
    }
}
