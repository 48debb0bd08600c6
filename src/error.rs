//! Error taxonomy
//!
//! Every public operation returns [`Result`], whose error side is [`VcsError`].
//! Precondition violations are reported before any state is touched, so a failed
//! operation leaves the working tree, the staging area and the refs untouched.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, VcsError>;

#[derive(Debug, Error)]
pub enum VcsError {
    #[error("nothing to commit: the staging area is empty")]
    EmptyCommit,

    #[error("a branch named '{0}' already exists")]
    DuplicateBranch(String),

    #[error("a tag named '{0}' already exists")]
    DuplicateTag(String),

    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("'{0}' did not match any branch or commit")]
    InvalidTarget(String),

    #[error("{staged} staged change(s) would be lost; commit or stash them first")]
    UncommittedChanges { staged: usize },

    #[error("merge stopped with {conflicts} unresolved conflict(s)")]
    MergeConflict { conflicts: usize },

    #[error("no pending conflict for {locale}:{key}")]
    UnknownConflict { locale: String, key: String },

    #[error("invalid remote: {0}")]
    InvalidRemote(String),

    #[error("no local changes to stash")]
    EmptyStash,

    #[error("stash@{{{index}}} does not exist ({len} stash entries)")]
    InvalidStashIndex { index: usize, len: usize },

    #[error("commit {0} does not exist")]
    InvalidCommitHash(String),

    #[error("cannot delete branch '{0}': it is checked out")]
    CurrentBranch(String),

    #[error("invalid key pattern: {0}")]
    InvalidPattern(String),

    #[error("unsupported export version {0}")]
    UnsupportedVersion(u32),

    #[error("remote transport failed: {0:#}")]
    Transport(#[source] anyhow::Error),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
