use crate::areas::repository::Repository;
use crate::artifacts::merge::conflict::{Conflict, Resolution};
use crate::artifacts::objects::change::Change;
use crate::config::ConflictStrategy;
use crate::error::{Result, VcsError};
use crate::events::Event;

impl Repository {
    /// Conflicts waiting to be resolved
    pub fn conflicts(&self) -> &[Conflict] {
        self.pending_merge
            .as_ref()
            .map(|pending| pending.conflicts.as_slice())
            .unwrap_or_default()
    }

    /// Resolve one conflict, writing the chosen value into the working tree and staging it
    ///
    /// `merged_value` is only read for [`Resolution::Merged`]; `None` there deletes the key.
    pub fn resolve_conflict(
        &mut self,
        locale: &str,
        key: &str,
        resolution: Resolution,
        merged_value: Option<String>,
    ) -> Result<Conflict> {
        let pending = self
            .pending_merge
            .as_mut()
            .ok_or_else(|| Self::unknown_conflict(locale, key))?;
        let position = pending
            .conflicts
            .iter()
            .position(|conflict| conflict.touches(locale, key))
            .ok_or_else(|| Self::unknown_conflict(locale, key))?;

        let mut conflict = pending.conflicts.remove(position);
        let remaining = pending.conflicts.len();
        let value = conflict.resolve(resolution, merged_value);

        let current = self.working_tree.get(locale, key).map(str::to_string);
        if let Some(change) = Change::between(locale, key, current, value) {
            self.record_change(&change);
        }

        tracing::info!(
            key = %conflict.translation_key(),
            ?resolution,
            remaining,
            "resolved conflict"
        );
        self.emit(Event::ConflictResolve {
            conflict: conflict.clone(),
        });

        if remaining == 0 {
            self.pending_merge = None;
            tracing::info!("all conflicts resolved");
            self.emit(Event::ConflictAllResolved);
        }

        Ok(conflict)
    }

    /// Resolve every pending conflict with `strategy`
    ///
    /// `Manual` resolves nothing. Returns the resolved conflicts.
    pub fn auto_resolve_conflicts(&mut self, strategy: ConflictStrategy) -> Result<Vec<Conflict>> {
        let decisions = self
            .conflicts()
            .iter()
            .filter_map(|conflict| {
                conflict
                    .auto_resolution(strategy)
                    .map(|resolution| (conflict.translation_key(), resolution))
            })
            .collect::<Vec<_>>();

        decisions
            .into_iter()
            .map(|(key, resolution)| self.resolve_conflict(&key.locale, &key.key, resolution, None))
            .collect()
    }

    fn unknown_conflict(locale: &str, key: &str) -> VcsError {
        VcsError::UnknownConflict {
            locale: locale.to_string(),
            key: key.to_string(),
        }
    }
}
