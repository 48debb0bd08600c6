//! Tree comparison
//!
//! - `tree_diff`: key-level diff between two working trees, reused by `diff`,
//!   `add` and merge planning

pub mod tree_diff;
