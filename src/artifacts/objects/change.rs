//! Translation changes
//!
//! A [`Change`] describes one add/modify/delete of a `(locale, key)` pair. Changes are
//! produced by every working-tree mutation, queued in the staging area and sealed into
//! commits. Replaying changes in order rebuilds a tree.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Add,
    Modify,
    Delete,
}

impl ChangeType {
    pub fn status_char(&self) -> char {
        match self {
            ChangeType::Add => 'A',
            ChangeType::Modify => 'M',
            ChangeType::Delete => 'D',
        }
    }
}

/// Address of a translation: `locale:key`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TranslationKey {
    pub locale: String,
    pub key: String,
}

impl TranslationKey {
    pub fn new(locale: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            key: key.into(),
        }
    }
}

impl std::fmt::Display for TranslationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.locale, self.key)
    }
}

/// Line-level summary of a value change, for human review only
///
/// Lines are split on `\n` and compared as sets; order follows the source value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineDiff {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

impl LineDiff {
    pub fn compute(old: Option<&str>, new: Option<&str>) -> Self {
        let old_lines = old.map(|v| v.split('\n').collect::<Vec<_>>()).unwrap_or_default();
        let new_lines = new.map(|v| v.split('\n').collect::<Vec<_>>()).unwrap_or_default();
        let old_set = old_lines.iter().copied().collect::<HashSet<_>>();
        let new_set = new_lines.iter().copied().collect::<HashSet<_>>();

        LineDiff {
            added: new_lines
                .iter()
                .filter(|line| !old_set.contains(*line))
                .map(|line| line.to_string())
                .collect(),
            removed: old_lines
                .iter()
                .filter(|line| !new_set.contains(*line))
                .map(|line| line.to_string())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    #[serde(rename = "type")]
    pub change_type: ChangeType,
    pub locale: String,
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_value: Option<String>,
    pub line_diff: LineDiff,
}

impl Change {
    /// Describe the transition `old -> new` for one key
    ///
    /// Returns `None` when nothing changes.
    pub fn between(
        locale: &str,
        key: &str,
        old_value: Option<String>,
        new_value: Option<String>,
    ) -> Option<Self> {
        let change_type = match (&old_value, &new_value) {
            (None, None) => return None,
            (Some(old), Some(new)) if old == new => return None,
            (None, Some(_)) => ChangeType::Add,
            (Some(_), Some(_)) => ChangeType::Modify,
            (Some(_), None) => ChangeType::Delete,
        };

        Some(Change {
            change_type,
            locale: locale.to_string(),
            key: key.to_string(),
            line_diff: LineDiff::compute(old_value.as_deref(), new_value.as_deref()),
            old_value,
            new_value,
        })
    }

    pub fn translation_key(&self) -> TranslationKey {
        TranslationKey::new(&self.locale, &self.key)
    }

    pub fn touches(&self, locale: &str, key: &str) -> bool {
        self.locale == locale && self.key == key
    }

    /// The value this change leaves behind; empty for a deletion
    pub fn resulting_line(&self) -> String {
        self.new_value.clone().unwrap_or_default()
    }

    /// Fold a later change to the same key into this one
    ///
    /// The result spans from this change's old value to the later change's new value,
    /// or `None` if the two cancel out.
    pub fn coalesce(&self, later: &Change) -> Option<Change> {
        Change::between(
            &self.locale,
            &self.key,
            self.old_value.clone(),
            later.new_value.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn infers_change_type() {
        let add = Change::between("en", "k", None, Some("a".into())).unwrap();
        let modify = Change::between("en", "k", Some("a".into()), Some("b".into())).unwrap();
        let delete = Change::between("en", "k", Some("a".into()), None).unwrap();

        assert_eq!(add.change_type, ChangeType::Add);
        assert_eq!(modify.change_type, ChangeType::Modify);
        assert_eq!(delete.change_type, ChangeType::Delete);
        assert!(Change::between("en", "k", Some("a".into()), Some("a".into())).is_none());
    }

    #[test]
    fn line_diff_is_set_difference() {
        let diff = LineDiff::compute(Some("one\ntwo\nthree"), Some("one\nthree\nfour"));
        assert_eq!(diff.added, vec!["four".to_string()]);
        assert_eq!(diff.removed, vec!["two".to_string()]);
    }

    #[test]
    fn coalescing_add_then_delete_cancels() {
        let add = Change::between("en", "k", None, Some("a".into())).unwrap();
        let delete = Change::between("en", "k", Some("a".into()), None).unwrap();
        assert!(add.coalesce(&delete).is_none());

        let modify = Change::between("en", "k", Some("a".into()), Some("b".into())).unwrap();
        let coalesced = add.coalesce(&modify).unwrap();
        assert_eq!(coalesced.change_type, ChangeType::Add);
        assert_eq!(coalesced.new_value.as_deref(), Some("b"));
    }

    #[test]
    fn serializes_with_type_tag() {
        let add = Change::between("en", "k", None, Some("a".into())).unwrap();
        let json = serde_json::to_value(&add).unwrap();
        assert_eq!(json["type"], "add");
        assert_eq!(json["newValue"], "a");
        assert!(json.get("oldValue").is_none());
    }
}
