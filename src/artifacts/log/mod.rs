//! Commit history traversal
//!
//! - `rev_list`: parent-chain walks and the `log` filter

pub mod rev_list;
