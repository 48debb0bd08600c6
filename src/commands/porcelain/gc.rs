use crate::areas::repository::Repository;
use crate::artifacts::gc::{self, GcReport};
use crate::artifacts::objects::object_id::ObjectId;
use crate::error::Result;

impl Repository {
    /// Collect unreachable commits past the ceiling and trim the stash stack
    pub fn gc(&mut self) -> Result<GcReport> {
        let mut report = self.gc_dry_run()?;

        gc::sweep(&mut self.database, &report.removed_commits);
        report.removed_stashes = self.stashes.trim().len();

        tracing::info!(
            removed_commits = report.removed_commits.len(),
            removed_stashes = report.removed_stashes,
            retained = report.retained,
            "garbage collection finished"
        );
        Ok(report)
    }

    /// What `gc` would remove, without removing it
    pub fn gc_dry_run(&self) -> Result<GcReport> {
        let total_before = self.database.len();
        let removed_commits =
            gc::plan_sweep(&self.database, &self.gc_roots(), self.config.max_commits);

        Ok(GcReport {
            retained: total_before - removed_commits.len(),
            removed_stashes: self.stashes.overflow(),
            removed_commits,
            total_before,
        })
    }

    /// Branch heads, tags, HEAD and remote-tracked heads
    pub(crate) fn gc_roots(&self) -> Vec<ObjectId> {
        let mut roots = self.refs.roots();
        roots.extend(self.remotes.tracked_hashes());
        roots
    }
}
