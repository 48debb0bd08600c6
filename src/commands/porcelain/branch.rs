use crate::areas::refs::{Branch, Head};
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::error::{Result, VcsError};
use crate::events::Event;

#[derive(Debug, Clone, Default)]
pub struct BranchOptions {
    /// Start point; defaults to HEAD
    pub from: Option<String>,
    /// Check the new branch out
    pub checkout: bool,
}

impl Repository {
    /// Create a branch, returning the commit it points at
    pub fn branch(&mut self, name: &str, options: BranchOptions) -> Result<ObjectId> {
        let switch = options.checkout.then_some(false);
        self.create_branch_at(name, options.from.as_deref(), switch)
    }

    pub fn branches(&self) -> Vec<&Branch> {
        self.refs.branches().collect()
    }

    /// Delete a branch that is not checked out, returning its head
    ///
    /// The commits stay in the store until garbage collection finds them unreachable.
    pub fn delete_branch(&mut self, name: &str) -> Result<ObjectId> {
        let branch_name = Self::parse_branch_name(name)?;
        let deleted = self.refs.delete_branch(&branch_name)?;

        tracing::info!(
            branch = %branch_name,
            head = %deleted.head.to_short_oid(),
            "deleted branch"
        );
        Ok(deleted.head)
    }

    /// Track `<remote>/<branch>` from a local branch
    pub fn set_upstream(&mut self, branch: &str, upstream: &str) -> Result<()> {
        let branch_name = Self::parse_branch_name(branch)?;
        let (remote, _) = upstream
            .split_once('/')
            .ok_or_else(|| VcsError::InvalidRemote(upstream.to_string()))?;
        self.remotes.get(remote)?;

        let branch = self
            .refs
            .branch_mut(&branch_name)
            .ok_or_else(|| VcsError::InvalidTarget(branch.to_string()))?;
        branch.upstream = Some(upstream.to_string());

        tracing::debug!(branch = %branch_name, upstream, "set upstream");
        Ok(())
    }

    /// Create a branch, optionally switching to it
    ///
    /// `switch` carries the checkout `force` flag. Every precondition is checked before
    /// anything changes.
    pub(crate) fn create_branch_at(
        &mut self,
        name: &str,
        from: Option<&str>,
        switch: Option<bool>,
    ) -> Result<ObjectId> {
        let branch_name = Self::parse_branch_name(name)?;
        if branch_name.is_head() || self.refs.branch(&branch_name).is_some() {
            return Err(VcsError::DuplicateBranch(name.to_string()));
        }

        let start = match from {
            Some(revision) => self.resolve_revision(revision)?,
            None => self.head()?,
        };

        let tree = match switch {
            Some(force) => {
                let tree = self.tree_for_switch(&start)?;
                self.prepare_switch(force)?;
                Some(tree)
            }
            None => None,
        };

        let created = self.now();
        self.refs.create_branch(Branch::new(
            branch_name.clone(),
            start.clone(),
            created,
            self.config.author.clone(),
        ))?;

        tracing::info!(branch = %branch_name, head = %start.to_short_oid(), "created branch");
        self.emit(Event::BranchCreate {
            name: branch_name.to_string(),
            head: start.clone(),
        });

        if let Some(tree) = tree {
            self.switch_to(Head::Attached(branch_name), start.clone(), tree, name);
        }

        Ok(start)
    }

    pub(crate) fn parse_branch_name(name: &str) -> Result<BranchName> {
        BranchName::try_parse(name.to_string())
            .map_err(|_| VcsError::InvalidBranchName(name.to_string()))
    }
}
