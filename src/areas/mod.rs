//! Repository state
//!
//! The mutable areas a [`Repository`](repository::Repository) is made of:
//!
//! - `database`: commit store keyed by hash
//! - `index`: bounded staging area
//! - `refs`: HEAD, branches and tags
//! - `remotes`: remote registry and remote-tracked heads
//! - `stash`: bounded stash stack
//! - `working_tree`: the editable translation table
//! - `repository`: the aggregate tying them together

pub mod database;
pub mod index;
pub mod refs;
pub mod remotes;
pub mod repository;
pub mod stash;
pub mod working_tree;
