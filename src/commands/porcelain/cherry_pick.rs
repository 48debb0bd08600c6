use crate::areas::repository::Repository;
use crate::areas::working_tree::WorkingTree;
use crate::artifacts::objects::change::Change;
use crate::artifacts::objects::commit::Author;
use crate::artifacts::objects::object_id::ObjectId;
use crate::error::{Result, VcsError};
use crate::events::Event;

impl Repository {
    /// Re-apply one commit's changes on top of HEAD as a new commit
    ///
    /// The new commit keeps the original message and author. Fails with `EmptyCommit`
    /// when HEAD already holds every picked value.
    pub fn cherry_pick(&mut self, revision: &str) -> Result<ObjectId> {
        self.ensure_clean_index()?;

        let source = self.resolve_revision(revision)?;
        let picked = self.database.parse_object_as_commit(&source)?;
        let (changes, tree) = replay(&self.working_tree, picked.changes());
        if changes.is_empty() {
            return Err(VcsError::EmptyCommit);
        }

        let message = picked.message().to_string();
        let original = picked.author().clone();
        let author = self.replayed_author(&original);
        let head = self.head()?;

        self.working_tree = tree;
        let commit = self.write_commit(Some(head), author, message, changes);

        tracing::info!(
            source = %source.to_short_oid(),
            commit = %commit.to_short_oid(),
            "cherry-picked"
        );
        self.emit(Event::CherryPick {
            source,
            commit: commit.clone(),
        });
        Ok(commit)
    }

    pub(crate) fn ensure_clean_index(&self) -> Result<()> {
        if self.index.is_empty() {
            Ok(())
        } else {
            Err(VcsError::UncommittedChanges {
                staged: self.index.len(),
            })
        }
    }

    /// Original identity, fresh timestamp
    pub(crate) fn replayed_author(&mut self, original: &Author) -> Author {
        Author::new(
            original.name().to_string(),
            original.email().to_string(),
            self.now(),
        )
    }
}

/// Replay `changes` on a copy of `tree`
///
/// Each change is rewritten to start from the value currently in the tree, and changes
/// that would not alter it are dropped. Returns the rewritten changes and the
/// resulting tree.
pub(crate) fn replay(tree: &WorkingTree, changes: &[Change]) -> (Vec<Change>, WorkingTree) {
    let mut scratch = tree.clone();
    let mut replayed = Vec::new();

    for change in changes {
        let current = scratch.get(&change.locale, &change.key).map(str::to_string);
        if let Some(rebased) =
            Change::between(&change.locale, &change.key, current, change.new_value.clone())
        {
            scratch.apply(&rebased);
            replayed.push(rebased);
        }
    }

    (replayed, scratch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn replay_rebases_old_values_and_drops_noops() {
        let mut tree = WorkingTree::new();
        tree.set("en", "hello", "Hey".into());
        tree.set("en", "bye", "Bye".into());

        let changes = vec![
            Change::between("en", "hello", Some("Hi".into()), Some("Hello".into())).unwrap(),
            Change::between("en", "bye", None, Some("Bye".into())).unwrap(),
        ];
        let (replayed, result) = replay(&tree, &changes);

        assert_eq!(replayed.len(), 1);
        assert_eq!(replayed[0].old_value.as_deref(), Some("Hey"));
        assert_eq!(result.get("en", "hello"), Some("Hello"));
        assert_eq!(tree.get("en", "hello"), Some("Hey"));
    }
}
