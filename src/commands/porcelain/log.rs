use crate::areas::repository::Repository;
use crate::artifacts::log::rev_list::{LogFilter, RevList};
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::error::{Result, VcsError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    /// Branch to walk; defaults to HEAD
    pub branch: Option<String>,
    pub limit: Option<usize>,
    pub since: Option<DateTime<Utc>>,
    /// Author name or email
    pub author: Option<String>,
}

/// One line of `blame` output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlameEntry {
    pub commit: ObjectId,
    pub author: String,
    pub timestamp: DateTime<Utc>,
    /// The value the commit left behind; empty for a deletion
    pub line: String,
}

impl Repository {
    /// Walk a branch's history newest first
    pub fn log(&self, options: LogOptions) -> Result<Vec<&Commit>> {
        let start = match options.branch.as_deref() {
            Some(branch) => {
                let name = Self::parse_branch_name(branch)?;
                self.refs
                    .branch(&name)
                    .map(|b| b.head.clone())
                    .ok_or_else(|| VcsError::InvalidTarget(branch.to_string()))?
            }
            None => self.head()?,
        };

        let filter = LogFilter {
            since: options.since,
            author: options.author,
        };

        Ok(RevList::starting_at(&self.database, &start)
            .filter(|commit| filter.matches(commit))
            .take(options.limit.unwrap_or(usize::MAX))
            .collect())
    }

    /// Branch, tag and detached HEAD names by the commit they point at
    pub fn decorations(&self) -> BTreeMap<ObjectId, Vec<String>> {
        self.refs.reverse_refs()
    }

    /// Every commit in HEAD's history touching `locale:key`, newest first
    pub fn blame(&self, locale: &str, key: &str) -> Result<Vec<BlameEntry>> {
        let head = self.head()?;

        Ok(RevList::starting_at(&self.database, &head)
            .filter_map(|commit| {
                commit.change_for(locale, key).map(|change| BlameEntry {
                    commit: commit.hash().clone(),
                    author: commit.author().name().to_string(),
                    timestamp: commit.timestamp(),
                    line: change.resulting_line(),
                })
            })
            .collect())
    }
}
