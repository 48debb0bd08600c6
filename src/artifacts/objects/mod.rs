//! Object types
//!
//! Everything the engine stores is a plain value identified by a SHA-1 hash:
//!
//! - **Change**: one add/modify/delete of a `locale:key` pair
//! - **Commit**: an immutable change set with author, message and parent
//! - **ObjectId**: the 40-character hex identifier shared by all of them

pub mod change;
pub mod commit;
pub mod object_id;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
