use crate::areas::repository::{PendingMerge, Repository};
use crate::artifacts::checkout::migration::tree_at;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::merge::conflict::Conflict;
use crate::artifacts::merge::three_way::{MergeStrategy, ThreeWayMerge};
use crate::artifacts::objects::change::{Change, TranslationKey};
use crate::artifacts::objects::object_id::ObjectId;
use crate::config::ConflictStrategy;
use crate::error::{Result, VcsError};
use crate::events::Event;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Default)]
pub struct MergeOptions {
    pub strategy: MergeStrategy,
    /// Stage the merge result without committing it
    pub no_commit: bool,
    /// Commit message; defaults to "Merge branch '<source>' into <current>"
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The source is already part of HEAD's history
    UpToDate,
    /// HEAD moved forward to the source without a new commit
    FastForward { head: ObjectId },
    /// Three-way merge applied; `commit` is `None` with `no_commit`
    Merged {
        commit: Option<ObjectId>,
        auto_resolved: Vec<Conflict>,
    },
    /// Clean changes are staged and the conflicts wait for `resolve_conflict`
    Conflicted { conflicts: Vec<Conflict> },
}

impl Repository {
    /// Merge a branch (or any revision) into HEAD
    ///
    /// Fast-forwards when HEAD has not diverged. Otherwise plans a three-way merge
    /// against the common ancestor. Conflicts are resolved by the configured policy when
    /// `auto_merge` is on; with the `manual` policy they stay pending. With `auto_merge`
    /// off any conflict fails the merge, leaving local state untouched and the
    /// conflicts listed by [`Repository::conflicts`].
    pub fn merge(&mut self, source: &str, options: MergeOptions) -> Result<MergeOutcome> {
        if let Some(pending) = self.pending_merge.as_ref().filter(|p| p.applied) {
            return Err(VcsError::MergeConflict {
                conflicts: pending.conflicts.len(),
            });
        }
        if !self.index.is_empty() {
            return Err(VcsError::UncommittedChanges {
                staged: self.index.len(),
            });
        }

        let theirs = self.resolve_revision(source)?;
        let ours = self.head()?;
        let base = self.common_ancestor(&ours, &theirs);
        tracing::debug!(
            source,
            ours = %ours.to_short_oid(),
            theirs = %theirs.to_short_oid(),
            base = ?base.as_ref().map(ObjectId::to_short_oid),
            "merging"
        );

        if base.as_ref() == Some(&theirs) {
            tracing::info!(source, "already up to date");
            self.pending_merge = None;
            return Ok(MergeOutcome::UpToDate);
        }
        if base.as_ref() == Some(&ours) {
            return self.fast_forward(source, theirs);
        }

        let base_tree = tree_at(&self.database, base.as_ref())?;
        let ours_tree = tree_at(&self.database, Some(&ours))?;
        let theirs_tree = tree_at(&self.database, Some(&theirs))?;

        let plan = ThreeWayMerge::new(&base_tree, &ours_tree, &theirs_tree).plan(
            options.strategy,
            |key| {
                (
                    self.last_touched(&ours, base.as_ref(), key),
                    self.last_touched(&theirs, base.as_ref(), key),
                )
            },
        );
        let mut changes = plan.changes;
        let mut conflicts = plan.conflicts;

        // merge commits keep a single parent, so a re-merge can find nothing new;
        // `ours` still records the merge even though it never changes the tree
        let records_merge = options.strategy == MergeStrategy::Ours;
        if changes.is_empty() && conflicts.is_empty() && !records_merge {
            tracing::info!(source, "already up to date");
            self.pending_merge = None;
            return Ok(MergeOutcome::UpToDate);
        }

        if !conflicts.is_empty() && !self.config.auto_merge {
            tracing::warn!(source, conflicts = conflicts.len(), "merge stopped on conflicts");
            let count = conflicts.len();
            self.pending_merge = Some(PendingMerge {
                source: source.to_string(),
                conflicts,
                applied: false,
            });
            return Err(VcsError::MergeConflict { conflicts: count });
        }

        let policy = self.config.conflict_resolution;
        let mut auto_resolved = Vec::new();
        if !conflicts.is_empty() && policy != ConflictStrategy::Manual {
            for mut conflict in conflicts.drain(..) {
                if let Some(resolution) = conflict.auto_resolution(policy) {
                    let value = conflict.resolve(resolution, None);
                    changes.extend(Change::between(
                        &conflict.locale,
                        &conflict.key,
                        conflict.ours_value.clone(),
                        value,
                    ));
                    auto_resolved.push(conflict);
                }
            }
            changes.sort_by_key(Change::translation_key);
        }

        for change in &changes {
            self.record_change(change);
        }

        if !conflicts.is_empty() {
            tracing::info!(source, conflicts = conflicts.len(), "merge has conflicts");
            self.pending_merge = Some(PendingMerge {
                source: source.to_string(),
                conflicts: conflicts.clone(),
                applied: true,
            });
            self.emit(Event::MergeConflict {
                source: source.to_string(),
                conflicts: conflicts.clone(),
            });
            return Ok(MergeOutcome::Conflicted { conflicts });
        }

        self.pending_merge = None;
        let commit = if options.no_commit {
            None
        } else {
            let message = options.message.unwrap_or_else(|| self.merge_message(source));
            let author = self.author(None, None);
            Some(self.write_commit(Some(ours), author, message, changes))
        };

        tracing::info!(
            source,
            commit = ?commit.as_ref().map(ObjectId::to_short_oid),
            auto_resolved = auto_resolved.len(),
            "merge complete"
        );
        self.emit(Event::MergeComplete {
            source: source.to_string(),
            commit: commit.clone(),
        });
        Ok(MergeOutcome::Merged {
            commit,
            auto_resolved,
        })
    }

    /// Drop a merge in progress, restoring HEAD's tree
    ///
    /// Returns false when no merge was in progress.
    pub fn abort_merge(&mut self) -> Result<bool> {
        let Some(pending) = self.pending_merge.take() else {
            return Ok(false);
        };

        if pending.applied {
            self.working_tree = self.head_tree()?;
            self.index.clear();
        }

        tracing::info!(source = %pending.source, "merge aborted");
        Ok(true)
    }

    fn fast_forward(&mut self, source: &str, theirs: ObjectId) -> Result<MergeOutcome> {
        let tree = self.tree_for_switch(&theirs)?;

        self.refs.update_head(theirs.clone());
        self.working_tree = tree;
        self.pending_merge = None;

        tracing::info!(source, head = %theirs.to_short_oid(), "fast-forward");
        self.emit(Event::MergeFastForward {
            source: source.to_string(),
            head: theirs.clone(),
        });
        Ok(MergeOutcome::FastForward { head: theirs })
    }

    /// Time of the newest commit between `tip` and `base` touching `key`
    ///
    /// Falls back to the tip's own timestamp when no commit on that side touches it.
    fn last_touched(
        &self,
        tip: &ObjectId,
        base: Option<&ObjectId>,
        key: &TranslationKey,
    ) -> DateTime<Utc> {
        let mut side = RevList::starting_at(&self.database, tip).until(base).peekable();
        let tip_timestamp = side.peek().map(|commit| commit.timestamp());

        side.find(|commit| commit.touches(&key.locale, &key.key))
            .map(|commit| commit.timestamp())
            .or(tip_timestamp)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    fn merge_message(&self, source: &str) -> String {
        let into = self
            .current_branch()
            .map(ToString::to_string)
            .unwrap_or_else(|| "HEAD".to_string());
        format!("Merge branch '{source}' into {into}")
    }
}
