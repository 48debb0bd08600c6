use crate::areas::repository::Repository;
use crate::artifacts::objects::change::Change;
use crate::events::Event;

impl Repository {
    /// Set `locale:key` to `value` and stage the change
    ///
    /// Setting a key to its current value is a no-op.
    pub fn set_translation(
        &mut self,
        locale: &str,
        key: &str,
        value: impl Into<String>,
    ) -> Option<Change> {
        let old_value = self.working_tree.get(locale, key).map(str::to_string);
        let change = Change::between(locale, key, old_value, Some(value.into()))?;

        self.record_change(&change);
        self.emit(Event::TranslationChange {
            change: change.clone(),
        });
        Some(change)
    }

    /// Remove `locale:key` and stage the deletion
    ///
    /// Deleting a missing key is a no-op.
    pub fn delete_translation(&mut self, locale: &str, key: &str) -> Option<Change> {
        let old_value = self.working_tree.get(locale, key).map(str::to_string);
        let change = Change::between(locale, key, old_value, None)?;

        self.record_change(&change);
        self.emit(Event::TranslationDelete {
            change: change.clone(),
        });
        Some(change)
    }

    pub fn translation(&self, locale: &str, key: &str) -> Option<&str> {
        self.working_tree.get(locale, key)
    }

    /// Apply a change to the working tree and stage it
    pub(crate) fn record_change(&mut self, change: &Change) {
        self.working_tree.apply(change);
        self.stage_change(change.clone());

        tracing::debug!(
            key = %change.translation_key(),
            change = %change.change_type.status_char(),
            "staged"
        );
    }

    /// Stage a change, logging any entry evicted to stay within capacity
    pub(crate) fn stage_change(&mut self, change: Change) {
        for dropped in self.index.stage(change) {
            tracing::warn!(
                key = %dropped.translation_key(),
                capacity = self.index.capacity(),
                "staging area full, oldest entry unstaged"
            );
        }
    }
}
