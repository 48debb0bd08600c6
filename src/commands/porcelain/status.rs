use crate::areas::repository::Repository;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::status_info::StatusInfo;
use crate::error::Result;
use std::collections::HashSet;

impl Repository {
    pub fn status(&self) -> Result<StatusInfo> {
        let head = self.head()?;
        let branch = self.current_branch().and_then(|name| self.refs.branch(name));

        let upstream = branch.and_then(|b| b.upstream.clone());
        let (ahead, behind) = upstream
            .as_deref()
            .and_then(|name| self.remotes.resolve_tracking(name))
            .map(|tracked| self.divergence(&head, &tracked))
            .unwrap_or((0, 0));

        Ok(StatusInfo {
            branch: branch.map(|b| b.name.to_string()),
            head,
            staged: self.index.changes(),
            conflicts: self.conflicts().to_vec(),
            stashes: self.stashes.len(),
            upstream,
            ahead,
            behind,
        })
    }

    /// Commits only on `ours`, commits only on `theirs`
    fn divergence(&self, ours: &ObjectId, theirs: &ObjectId) -> (usize, usize) {
        let base = self.common_ancestor(ours, theirs);
        let count = |tip: &ObjectId| {
            RevList::starting_at(&self.database, tip)
                .until(base.as_ref())
                .map(|commit| commit.hash())
                .collect::<HashSet<_>>()
                .len()
        };

        (count(ours), count(theirs))
    }
}
