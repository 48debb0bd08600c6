use crate::areas::repository::Repository;
use crate::artifacts::diff::tree_diff::TreeDiff;
use crate::artifacts::index::key_pattern::KeyPattern;
use crate::artifacts::objects::change::Change;
use crate::error::{Result, VcsError};

impl Repository {
    /// Stage every working-tree difference from HEAD matching `pattern`
    ///
    /// Mutations stage themselves, so this only matters for entries that fell out of
    /// a full staging area. Returns the number of keys (re)staged.
    pub fn add(&mut self, pattern: Option<&str>) -> Result<usize> {
        let pattern = Self::key_pattern(pattern)?;
        let head_tree = self.head_tree()?;

        let changes = TreeDiff::new(&head_tree, &self.working_tree)
            .changes()
            .into_iter()
            .filter(|change| Self::pattern_matches(&pattern, change))
            .filter(|change| self.index.entry(&change.translation_key()) != Some(change))
            .collect::<Vec<_>>();

        for change in &changes {
            self.index.unstage(&change.translation_key());
            self.stage_change(change.clone());
        }

        tracing::debug!(staged = changes.len(), "add");
        Ok(changes.len())
    }

    /// Unstage entries matching `pattern`, restoring their HEAD values
    ///
    /// Returns the changes that were discarded.
    pub fn reset(&mut self, pattern: Option<&str>) -> Result<Vec<Change>> {
        let pattern = Self::key_pattern(pattern)?;
        let head_tree = self.head_tree()?;

        let keys = self
            .index
            .keys()
            .filter(|key| pattern.as_ref().is_none_or(|p| p.matches(key)))
            .cloned()
            .collect::<Vec<_>>();

        let mut discarded = Vec::with_capacity(keys.len());
        for key in keys {
            if let Some(change) = self.index.unstage(&key) {
                self.working_tree.put(
                    &key.locale,
                    &key.key,
                    head_tree.get(&key.locale, &key.key).map(str::to_string),
                );
                discarded.push(change);
            }
        }

        tracing::debug!(unstaged = discarded.len(), "reset");
        Ok(discarded)
    }

    fn key_pattern(pattern: Option<&str>) -> Result<Option<KeyPattern>> {
        pattern
            .map(|p| KeyPattern::try_parse(p).map_err(|_| VcsError::InvalidPattern(p.to_string())))
            .transpose()
    }

    fn pattern_matches(pattern: &Option<KeyPattern>, change: &Change) -> bool {
        pattern
            .as_ref()
            .is_none_or(|p| p.matches(&change.translation_key()))
    }
}
