//! Porcelain commands
//!
//! The user-facing operations, composed from the areas and the plumbing:
//!
//! - `translation`: edit the working tree
//! - `add`: stage and unstage keys
//! - `commit`: seal the staging area
//! - `branch`, `checkout`, `tag`: move refs around
//! - `merge`, `conflict`: combine histories and resolve what collides
//! - `stash`: shelve staged work
//! - `log`, `diff`, `status`: read-only queries
//! - `cherry_pick`, `rebase`: replay commits elsewhere
//! - `remote`: fetch, push and pull
//! - `gc`: collect unreachable commits
//! - `transfer`: export and import whole repositories
//! - `config`: runtime configuration

pub mod add;
pub mod branch;
pub mod checkout;
pub mod cherry_pick;
pub mod commit;
pub mod config;
pub mod conflict;
pub mod diff;
pub mod gc;
pub mod log;
pub mod merge;
pub mod rebase;
pub mod remote;
pub mod stash;
pub mod status;
pub mod tag;
pub mod transfer;
pub mod translation;
