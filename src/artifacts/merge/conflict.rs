//! Merge conflicts
//!
//! A conflict records one `locale:key` changed to different values on both sides of a
//! three-way merge. Conflicts stay pending until resolved by hand or by a policy.

use crate::artifacts::objects::change::TranslationKey;
use crate::config::ConflictStrategy;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    Ours,
    Theirs,
    /// A value supplied by whoever resolved the conflict
    Merged,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    pub locale: String,
    pub key: String,
    pub ours_value: Option<String>,
    pub theirs_value: Option<String>,
    pub base_value: Option<String>,
    pub ours_timestamp: DateTime<Utc>,
    pub theirs_timestamp: DateTime<Utc>,
    pub resolved: bool,
    pub resolution: Option<Resolution>,
    /// The value the key ends up with once resolved
    pub merged_value: Option<String>,
}

impl Conflict {
    pub fn translation_key(&self) -> TranslationKey {
        TranslationKey::new(&self.locale, &self.key)
    }

    pub fn touches(&self, locale: &str, key: &str) -> bool {
        self.locale == locale && self.key == key
    }

    /// The value `resolution` selects
    pub fn value_for(
        &self,
        resolution: Resolution,
        merged_value: Option<String>,
    ) -> Option<String> {
        match resolution {
            Resolution::Ours => self.ours_value.clone(),
            Resolution::Theirs => self.theirs_value.clone(),
            Resolution::Merged => merged_value,
        }
    }

    /// Mark resolved, returning the value the key should take
    pub fn resolve(
        &mut self,
        resolution: Resolution,
        merged_value: Option<String>,
    ) -> Option<String> {
        let value = self.value_for(resolution, merged_value);
        self.resolved = true;
        self.resolution = Some(resolution);
        self.merged_value = value.clone();
        value
    }

    /// Pick a side according to `strategy`; `None` for manual resolution
    ///
    /// `latest` compares the timestamps of each side's last change to the key; a tie
    /// goes to theirs. `merge` takes whichever side left the base value alone and
    /// falls back to `latest` when both changed it.
    pub fn auto_resolution(&self, strategy: ConflictStrategy) -> Option<Resolution> {
        match strategy {
            ConflictStrategy::Manual => None,
            ConflictStrategy::Ours => Some(Resolution::Ours),
            ConflictStrategy::Theirs => Some(Resolution::Theirs),
            ConflictStrategy::Latest => Some(self.latest_side()),
            ConflictStrategy::Merge => {
                if self.ours_value == self.base_value {
                    Some(Resolution::Theirs)
                } else if self.theirs_value == self.base_value {
                    Some(Resolution::Ours)
                } else {
                    Some(self.latest_side())
                }
            }
        }
    }

    fn latest_side(&self) -> Resolution {
        if self.ours_timestamp > self.theirs_timestamp {
            Resolution::Ours
        } else {
            Resolution::Theirs
        }
    }
}
