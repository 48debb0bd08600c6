//! Best common ancestor finder
//!
//! Commits form a single-parent chain, so two tips share at most one lowest common
//! ancestor. The search runs in two phases:
//!
//! 1. Walk the target's parent chain, marking every commit `VISITED_FROM_TARGET`
//! 2. Walk the source's parent chain, marking `VISITED_FROM_SOURCE`, until a commit
//!    already visited from the target side is found. That commit is the result.
//!
//! Disjoint histories have no common ancestor; merge treats that as an empty base.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let finder = BCAFinder::new(|commit_id| database.slim_commit(commit_id));
//! let base = finder.find_best_common_ancestor(&ours, &theirs);
//! ```

use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::collections::HashMap;
use std::fmt;

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    struct VisitState: u8 {
        const NONE = 0b00;
        const VISITED_FROM_SOURCE = 0b01;
        const VISITED_FROM_TARGET = 0b10;
        const VISITED_FROM_BOTH =
            Self::VISITED_FROM_SOURCE.bits() | Self::VISITED_FROM_TARGET.bits();
        const RESULT = 0b100;
    }
}

impl fmt::Debug for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.contains(VisitState::VISITED_FROM_SOURCE) {
            flags.push("SOURCE");
        }
        if self.contains(VisitState::VISITED_FROM_TARGET) {
            flags.push("TARGET");
        }
        if self.contains(VisitState::RESULT) {
            flags.push("RESULT");
        }
        if flags.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", flags.join("|"))
        }
    }
}

/// Finds the lowest common ancestor of two commits
///
/// `commit_loader` returns the slim form of a commit, or `None` for a hash the store
/// does not hold; the walk stops there as if it had reached a root.
pub struct BCAFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> Option<SlimCommit>,
{
    commit_loader: CommitLoaderFn,
}

impl<CommitLoaderFn> BCAFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> Option<SlimCommit>,
{
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self { commit_loader }
    }

    pub fn find_best_common_ancestor(
        &self,
        target_commit_id: &ObjectId,
        source_commit_id: &ObjectId,
    ) -> Option<ObjectId> {
        let mut states = HashMap::<ObjectId, VisitState>::new();

        self.walk(target_commit_id, |oid| {
            let state = states.entry(oid.clone()).or_insert(VisitState::NONE);
            if state.contains(VisitState::VISITED_FROM_TARGET) {
                return false;
            }
            state.insert(VisitState::VISITED_FROM_TARGET);
            true
        });

        let mut result = None;
        self.walk(source_commit_id, |oid| {
            let state = states.entry(oid.clone()).or_insert(VisitState::NONE);
            if state.contains(VisitState::VISITED_FROM_SOURCE) {
                return false;
            }
            state.insert(VisitState::VISITED_FROM_SOURCE);

            if state.contains(VisitState::VISITED_FROM_BOTH) {
                state.insert(VisitState::RESULT);
                tracing::trace!(ancestor = %oid, state = ?state, "found common ancestor");
                result = Some(oid.clone());
                return false;
            }
            true
        });

        tracing::trace!(
            target = %target_commit_id,
            source = %source_commit_id,
            visited = states.len(),
            result = ?result,
            "best common ancestor search finished"
        );
        result
    }

    /// Whether `ancestor` is reachable from `descendant` (a commit is its own ancestor)
    pub fn is_ancestor(&self, ancestor: &ObjectId, descendant: &ObjectId) -> bool {
        self.find_best_common_ancestor(descendant, ancestor).as_ref() == Some(ancestor)
    }

    /// Follow the parent chain from `start`, calling `visit` until it returns false
    fn walk(&self, start: &ObjectId, mut visit: impl FnMut(&ObjectId) -> bool) {
        let mut current = Some(start.clone());

        while let Some(oid) = current {
            if !visit(&oid) {
                break;
            }
            current = (self.commit_loader)(&oid).and_then(|commit| commit.parent);
        }
    }
}
