use crate::areas::repository::Repository;
use crate::artifacts::gc;
use crate::artifacts::objects::change::Change;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::object_id::ObjectId;
use crate::events::Event;

impl Repository {
    /// Seal `changes` into a commit on top of `parent` and advance HEAD to it
    ///
    /// Clears the staging area and runs garbage collection when the store grows past
    /// the configured ceiling. Callers validate everything beforehand; this step
    /// cannot fail.
    pub(crate) fn write_commit(
        &mut self,
        parent: Option<ObjectId>,
        author: Author,
        message: String,
        changes: Vec<Change>,
    ) -> ObjectId {
        let commit = Commit::new(parent, author, message, changes, self.working_tree.tree_hash());
        let summary = commit.short_message();

        let commit_id = self.database.store(commit);
        self.refs.update_head(commit_id.clone());
        self.index.clear();

        let branch = self.current_branch().map(ToString::to_string);
        tracing::info!(
            commit = %commit_id.to_short_oid(),
            branch = branch.as_deref().unwrap_or("HEAD"),
            message = %summary,
            "created commit"
        );
        self.emit(Event::Commit {
            hash: commit_id.clone(),
            message: summary,
            branch,
        });

        if self.database.len() > self.config.max_commits {
            let roots = self.gc_roots();
            let victims = gc::plan_sweep(&self.database, &roots, self.config.max_commits);
            if !victims.is_empty() {
                tracing::debug!(removed = victims.len(), "automatic gc");
                gc::sweep(&mut self.database, &victims);
            }
        }

        commit_id
    }
}
