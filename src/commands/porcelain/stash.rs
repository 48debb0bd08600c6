use crate::areas::repository::Repository;
use crate::areas::stash::Stash;
use crate::artifacts::objects::change::Change;
use crate::artifacts::objects::object_id::ObjectId;
use crate::error::{Result, VcsError};
use crate::events::Event;

impl Repository {
    /// Shelve the staged changes, restoring their keys to the values before staging
    pub fn stash(&mut self, message: Option<&str>) -> Result<ObjectId> {
        if self.index.is_empty() {
            return Err(VcsError::EmptyStash);
        }

        let branch = self.current_branch().map(ToString::to_string);
        let message = message.map(str::to_string).unwrap_or_else(|| {
            format!("WIP on {}", branch.as_deref().unwrap_or("HEAD"))
        });

        let changes = self.index.clear();
        for change in changes.iter().rev() {
            self.working_tree.revert(change);
        }

        let timestamp = self.now();
        let stash = Stash::new(message.clone(), timestamp, changes, branch);
        let id = stash.id.clone();

        for dropped in self.stashes.push(stash) {
            tracing::warn!(
                stash = %dropped.id.to_short_oid(),
                "stash stack full, dropped oldest entry"
            );
        }

        tracing::info!(stash = %id.to_short_oid(), message = %message, "saved stash");
        self.emit(Event::StashSave {
            id: id.clone(),
            message,
        });
        Ok(id)
    }

    /// Re-apply and re-stage a stash, then drop it
    ///
    /// Index 0 is the most recent stash.
    pub fn stash_pop(&mut self, index: usize) -> Result<Stash> {
        let stash = self.stashes.pop(index).ok_or(VcsError::InvalidStashIndex {
            index,
            len: self.stashes.len(),
        })?;

        for change in &stash.changes {
            let current = self
                .working_tree
                .get(&change.locale, &change.key)
                .map(str::to_string);
            if let Some(restaged) =
                Change::between(&change.locale, &change.key, current, change.new_value.clone())
            {
                self.record_change(&restaged);
            }
        }

        tracing::info!(
            stash = %stash.id.to_short_oid(),
            changes = stash.changes.len(),
            "popped stash"
        );
        self.emit(Event::StashPop {
            id: stash.id.clone(),
        });
        Ok(stash)
    }

    pub fn stash_list(&self) -> Vec<&Stash> {
        self.stashes.list().collect()
    }
}
