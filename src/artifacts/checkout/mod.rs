//! Checkout support
//!
//! - `migration`: rebuilding the tree at a commit by replaying its history

pub mod migration;
