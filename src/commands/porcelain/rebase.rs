use crate::areas::repository::Repository;
use crate::artifacts::checkout::migration::tree_at;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::commit::Author;
use crate::artifacts::objects::object_id::ObjectId;
use crate::commands::porcelain::cherry_pick::replay;
use crate::error::{Result, VcsError};
use crate::events::Event;

#[derive(Debug, Clone, Default)]
pub struct RebaseOptions {
    /// Keep commits whose changes are already present on the new base
    pub keep_empty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebaseOutcome {
    pub head: ObjectId,
    /// New commits, oldest first
    pub replayed: Vec<ObjectId>,
    /// Original commits dropped because they became empty
    pub skipped: Vec<ObjectId>,
}

impl Repository {
    /// Replay HEAD's commits since the common ancestor on top of `onto`
    ///
    /// A replayed change always wins over the value it lands on. Commits left without
    /// changes are skipped unless `keep_empty` is set; the rebase fails with
    /// `EmptyCommit` if every commit would be skipped.
    pub fn rebase(&mut self, onto: &str, options: RebaseOptions) -> Result<RebaseOutcome> {
        self.ensure_clean_index()?;
        if let Some(pending) = self.pending_merge.as_ref().filter(|p| p.applied) {
            return Err(VcsError::MergeConflict {
                conflicts: pending.conflicts.len(),
            });
        }

        let target = self.resolve_revision(onto)?;
        let head = self.head()?;
        let base = self.common_ancestor(&head, &target);
        if base.as_ref() == Some(&target) {
            tracing::info!(onto, "already up to date");
            return Ok(RebaseOutcome {
                head,
                replayed: Vec::new(),
                skipped: Vec::new(),
            });
        }

        let mut commits = RevList::starting_at(&self.database, &head)
            .until(base.as_ref())
            .collect::<Vec<_>>();
        commits.reverse();

        let target_tree = tree_at(&self.database, Some(&target))?;
        let mut tree = target_tree.clone();
        let mut plan: Vec<(ObjectId, Author, String, Vec<_>, _)> = Vec::new();
        let mut skipped = Vec::new();
        for commit in commits {
            let (changes, next) = replay(&tree, commit.changes());
            if changes.is_empty() && !options.keep_empty {
                tracing::debug!(commit = %commit.hash().to_short_oid(), "skipping empty commit");
                skipped.push(commit.hash().clone());
                continue;
            }
            tree = next.clone();
            plan.push((
                commit.hash().clone(),
                commit.author().clone(),
                commit.message().to_string(),
                changes,
                next,
            ));
        }

        if plan.is_empty() && !skipped.is_empty() {
            return Err(VcsError::EmptyCommit);
        }

        self.refs.update_head(target.clone());
        self.working_tree = target_tree;

        let mut replayed = Vec::with_capacity(plan.len());
        let mut parent = target;
        for (original, author, message, changes, tree) in plan {
            let author = self.replayed_author(&author);
            self.working_tree = tree;
            parent = self.write_commit(Some(parent), author, message, changes);
            tracing::trace!(
                original = %original.to_short_oid(),
                replayed = %parent.to_short_oid(),
                "replayed commit"
            );
            replayed.push(parent.clone());
        }

        tracing::info!(
            onto,
            head = %parent.to_short_oid(),
            replayed = replayed.len(),
            skipped = skipped.len(),
            "rebase complete"
        );
        self.emit(Event::RebaseComplete {
            onto: onto.to_string(),
            head: parent.clone(),
        });
        Ok(RebaseOutcome {
            head: parent,
            replayed,
            skipped,
        })
    }
}
