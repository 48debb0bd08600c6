//! Whole-repository snapshots
//!
//! `export` serializes every commit, ref, stash, remote and the config into one JSON
//! document. `import` replaces the repository with such a document wholesale.

use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::{Branch, Head, Refs, Tag};
use crate::areas::remotes::{Remote, Remotes};
use crate::areas::repository::Repository;
use crate::areas::stash::{Stash, StashStack};
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::config::Config;
use crate::error::{Result, VcsError};
use crate::events::Event;
use serde::{Deserialize, Serialize};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositorySnapshot {
    pub version: u32,
    /// Oldest first
    pub commits: Vec<Commit>,
    pub branches: Vec<Branch>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    pub head: Head,
    #[serde(default)]
    pub stashes: Vec<Stash>,
    #[serde(default)]
    pub remotes: Vec<Remote>,
    #[serde(default)]
    pub config: Config,
}

impl RepositorySnapshot {
    /// Check the document is self-consistent and build its commit store
    fn validate(&self) -> Result<Database> {
        if self.version != SNAPSHOT_VERSION {
            return Err(VcsError::UnsupportedVersion(self.version));
        }

        let mut database = Database::new();
        for commit in &self.commits {
            database.store(commit.clone());
        }

        let missing = |oid: &ObjectId| -> Result<()> {
            match database.contains(oid) {
                true => Ok(()),
                false => Err(VcsError::InvalidCommitHash(oid.to_string())),
            }
        };

        for commit in &self.commits {
            if let Some(parent) = commit.parent() {
                missing(parent)?;
            }
        }
        for branch in &self.branches {
            missing(&branch.head)?;
        }
        for tag in &self.tags {
            missing(&tag.commit_hash)?;
        }
        match &self.head {
            Head::Attached(name) if !self.branches.iter().any(|b| &b.name == name) => {
                return Err(VcsError::InvalidTarget(name.to_string()));
            }
            Head::Detached(oid) => missing(oid)?,
            Head::Attached(_) => {}
        }

        Ok(database)
    }
}

impl Repository {
    pub fn snapshot(&self) -> RepositorySnapshot {
        RepositorySnapshot {
            version: SNAPSHOT_VERSION,
            commits: self
                .database
                .commits_by_age()
                .into_iter()
                .cloned()
                .collect(),
            branches: self.refs.branches().cloned().collect(),
            tags: self.refs.tags().cloned().collect(),
            head: self.refs.head().clone(),
            stashes: self.stashes.list().cloned().collect(),
            remotes: self.remotes.list().cloned().collect(),
            config: self.config.clone(),
        }
    }

    /// Serialize the whole repository to JSON
    ///
    /// Staged changes and pending merge conflicts are not part of the snapshot.
    pub fn export(&self) -> Result<String> {
        let json = serde_json::to_string(&self.snapshot())?;
        tracing::info!(commits = self.database.len(), bytes = json.len(), "exported repository");
        Ok(json)
    }

    /// Replace the repository with an exported snapshot
    ///
    /// The document is validated in full first, so a bad document changes nothing.
    /// Afterwards the configured default branch is checked out.
    pub fn import(&mut self, json: &str) -> Result<()> {
        let snapshot: RepositorySnapshot = serde_json::from_str(json)?;
        let database = snapshot.validate()?;

        let default_branch = BranchName::try_parse(snapshot.config.default_branch.clone())
            .map_err(|_| VcsError::InvalidTarget(snapshot.config.default_branch.clone()))?;
        let head = snapshot
            .branches
            .iter()
            .find(|branch| branch.name == default_branch)
            .map(|branch| branch.head.clone())
            .ok_or_else(|| VcsError::InvalidTarget(default_branch.to_string()))?;
        let working_tree = Migration::plan(&database, &head)?.into_tree();

        let config = snapshot.config;
        let mut stashes = StashStack::new(config.max_stashes);
        stashes.replace(snapshot.stashes);
        let mut remotes = Remotes::new();
        remotes.replace(snapshot.remotes);

        self.refs = Refs::from_parts(
            Head::Attached(default_branch.clone()),
            snapshot.branches,
            snapshot.tags,
        );
        self.index = Index::new(config.max_staged);
        self.database = database;
        self.working_tree = working_tree;
        self.stashes = stashes;
        self.remotes = remotes;
        self.pending_merge = None;
        self.config = config;

        tracing::info!(
            commits = self.database.len(),
            branch = %default_branch,
            head = %head.to_short_oid(),
            "imported repository"
        );
        self.emit(Event::Checkout {
            target: default_branch.to_string(),
            head,
            detached: false,
        });
        Ok(())
    }
}
