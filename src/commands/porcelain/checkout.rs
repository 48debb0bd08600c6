use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use crate::areas::working_tree::WorkingTree;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::object_id::ObjectId;
use crate::error::{Result, VcsError};
use crate::events::Event;

#[derive(Debug, Clone, Default)]
pub struct CheckoutOptions {
    /// Discard staged changes instead of refusing
    pub force: bool,
    /// Create `target` as a new branch at HEAD first
    pub create_new: bool,
}

impl Repository {
    /// Switch HEAD to a branch, or detach it at any other revision
    ///
    /// The working tree is rebuilt by replaying the target's history, so it depends
    /// only on the target commit. Returns the new HEAD commit.
    pub fn checkout(&mut self, target: &str, options: CheckoutOptions) -> Result<ObjectId> {
        if options.create_new {
            return self.create_branch_at(target, None, Some(options.force));
        }

        let branch = BranchName::try_parse(target.to_string())
            .ok()
            .filter(|name| !name.is_head() && self.refs.branch(name).is_some());

        let (head, oid) = match branch {
            Some(name) => {
                let oid = self
                    .refs
                    .read_ref(&name)
                    .ok_or_else(|| VcsError::InvalidTarget(target.to_string()))?;
                (Head::Attached(name), oid)
            }
            None => {
                let oid = self.resolve_revision(target)?;
                (Head::Detached(oid.clone()), oid)
            }
        };

        let tree = self.tree_for_switch(&oid)?;
        self.prepare_switch(options.force)?;
        self.switch_to(head, oid.clone(), tree, target);

        Ok(oid)
    }

    pub(crate) fn tree_for_switch(&self, oid: &ObjectId) -> Result<WorkingTree> {
        Ok(Migration::plan(&self.database, oid)?.into_tree())
    }

    /// Deal with local state before HEAD moves
    ///
    /// Staged changes are discarded with `force`, stashed when auto-stash is on, and
    /// refused otherwise. Unresolved merge conflicts are refused unless forced.
    pub(crate) fn prepare_switch(&mut self, force: bool) -> Result<()> {
        if let Some(pending) = self.pending_merge.as_ref().filter(|p| p.applied) {
            if !force && !pending.conflicts.is_empty() {
                return Err(VcsError::MergeConflict {
                    conflicts: pending.conflicts.len(),
                });
            }
        }

        if self.index.is_empty() {
            return Ok(());
        }

        if force {
            let discarded = self.index.clear();
            tracing::warn!(discarded = discarded.len(), "discarding staged changes");
            Ok(())
        } else if self.config.auto_stash {
            self.stash(Some("auto-stash before checkout"))?;
            Ok(())
        } else {
            Err(VcsError::UncommittedChanges {
                staged: self.index.len(),
            })
        }
    }

    pub(crate) fn switch_to(&mut self, head: Head, oid: ObjectId, tree: WorkingTree, target: &str) {
        let detached = matches!(head, Head::Detached(_));

        self.refs.set_head(head);
        self.working_tree = tree;
        self.index.clear();
        self.pending_merge = None;

        tracing::info!(target, head = %oid.to_short_oid(), detached, "checked out");
        self.emit(Event::Checkout {
            target: target.to_string(),
            head: oid,
            detached,
        });
    }
}
