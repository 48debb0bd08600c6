//! Staging helpers
//!
//! - `key_pattern`: `locale:key` glob patterns used by `add` and `reset`

pub mod key_pattern;
