//! Plumbing commands
//!
//! Low-level building blocks shared by the porcelain commands.
//!
//! - `write_commit`: seal a change set into a commit and advance HEAD

mod write_commit;
