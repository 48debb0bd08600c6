use crate::artifacts::merge::conflict::Conflict;
use crate::artifacts::objects::change::Change;
use crate::artifacts::objects::object_id::ObjectId;
use serde::Serialize;

/// Snapshot of the repository state returned by `status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusInfo {
    /// Checked-out branch; `None` when HEAD is detached
    pub branch: Option<String>,
    pub head: ObjectId,
    pub staged: Vec<Change>,
    pub conflicts: Vec<Conflict>,
    pub stashes: usize,
    pub upstream: Option<String>,
    /// Commits on HEAD missing from the upstream
    pub ahead: usize,
    /// Commits on the upstream missing from HEAD
    pub behind: usize,
}

impl StatusInfo {
    pub fn is_clean(&self) -> bool {
        self.staged.is_empty() && self.conflicts.is_empty()
    }

    pub fn is_detached(&self) -> bool {
        self.branch.is_none()
    }
}
