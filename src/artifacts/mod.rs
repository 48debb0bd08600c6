//! Data structures and algorithms
//!
//! - `branch`: ref names and revision expressions
//! - `checkout`: tree reconstruction by replaying history
//! - `core`: hashing helpers
//! - `diff`: tree diffing
//! - `gc`: mark-sweep collection of unreachable commits
//! - `index`: key patterns for staging
//! - `log`: history traversal and filtering
//! - `merge`: common ancestor search and three-way merge
//! - `objects`: changes, commits and object ids
//! - `remote`: the transport seam
//! - `status`: status reports

pub mod branch;
pub mod checkout;
pub mod core;
pub mod diff;
pub mod gc;
pub mod index;
pub mod log;
pub mod merge;
pub mod objects;
pub mod remote;
pub mod status;
