use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::error::{Result, VcsError};

#[derive(Debug, Clone, Default)]
pub struct CommitOptions {
    pub author: Option<String>,
    pub email: Option<String>,
    /// Replace the HEAD commit instead of adding a new one
    pub amend: bool,
}

impl Repository {
    /// Seal the staging area into a new commit on HEAD
    ///
    /// With `amend`, the new commit replaces HEAD: it takes HEAD's parent and carries
    /// HEAD's changes followed by the newly staged ones.
    pub fn commit(&mut self, message: &str, options: CommitOptions) -> Result<ObjectId> {
        if self.index.is_empty() && !options.amend {
            return Err(VcsError::EmptyCommit);
        }
        if let Some(pending) = self
            .pending_merge
            .as_ref()
            .filter(|p| p.applied && !p.conflicts.is_empty())
        {
            return Err(VcsError::MergeConflict {
                conflicts: pending.conflicts.len(),
            });
        }

        let head = self.head()?;
        let (parent, mut changes) = if options.amend {
            let amended = self.database.parse_object_as_commit(&head)?;
            (amended.parent().cloned(), amended.changes().to_vec())
        } else {
            (Some(head), Vec::new())
        };
        changes.extend(self.index.changes());

        let author = self.author(options.author, options.email);
        self.pending_merge = None;
        Ok(self.write_commit(parent, author, message.trim().to_string(), changes))
    }
}
