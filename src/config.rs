//! Repository configuration
//!
//! Every field has a default, so a partial JSON document is a valid config.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Policy applied to merge conflicts when `auto_merge` is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictStrategy {
    /// Leave conflicts pending until resolved by hand
    #[default]
    Manual,
    /// Take the side whose last change to the key is newer
    Latest,
    Ours,
    Theirs,
    /// Take the side that changed, fall back to `Latest` when both did
    Merge,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub author: String,
    pub email: String,
    pub default_branch: String,
    pub auto_stash: bool,
    pub auto_merge: bool,
    pub conflict_resolution: ConflictStrategy,
    /// Commit count above which unreachable commits are collected
    pub max_commits: usize,
    pub max_stashes: usize,
    pub max_staged: usize,
    pub remote_latency_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            author: "system".to_string(),
            email: "system@localhost".to_string(),
            default_branch: "main".to_string(),
            auto_stash: false,
            auto_merge: true,
            conflict_resolution: ConflictStrategy::Manual,
            max_commits: 1000,
            max_stashes: 10,
            max_staged: 1000,
            remote_latency_ms: 0,
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
