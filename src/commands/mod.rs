//! Command implementations
//!
//! Every command is an `impl Repository` block:
//!
//! - `plumbing`: internal building blocks (writing a commit)
//! - `porcelain`: the user-facing workflow (commit, branch, merge, stash, remotes, ...)

pub mod plumbing;
pub mod porcelain;
