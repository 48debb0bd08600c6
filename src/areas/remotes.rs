//! Remote registry
//!
//! Named remotes and the branch heads last seen on each. The registry only records
//! what the transport reported; it never talks to the network itself.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::error::{Result, VcsError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Remote {
    pub name: String,
    pub url: String,
    /// Remote branch name to the head hash last fetched or pushed
    pub branches: BTreeMap<String, ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_fetch: Option<DateTime<Utc>>,
}

impl Remote {
    pub fn new(name: String, url: String) -> Self {
        Remote {
            name,
            url,
            branches: BTreeMap::new(),
            last_fetch: None,
        }
    }

    /// `<remote>/<branch>` name for a remote branch
    pub fn tracking_name(&self, branch: &str) -> String {
        format!("{}/{}", self.name, branch)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Remotes {
    remotes: BTreeMap<String, Remote>,
}

impl Remotes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, remote: Remote) -> Result<()> {
        // remote names become the first segment of tracking names
        let valid = !remote.name.contains('/')
            && BranchName::try_parse(remote.name.clone()).is_ok()
            && !remote.url.trim().is_empty();
        if !valid {
            return Err(VcsError::InvalidRemote(remote.name));
        }
        if self.remotes.contains_key(&remote.name) {
            return Err(VcsError::InvalidRemote(format!(
                "remote {} already exists",
                remote.name
            )));
        }

        self.remotes.insert(remote.name.clone(), remote);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&Remote> {
        self.remotes
            .get(name)
            .ok_or_else(|| VcsError::InvalidRemote(name.to_string()))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut Remote> {
        self.remotes
            .get_mut(name)
            .ok_or_else(|| VcsError::InvalidRemote(name.to_string()))
    }

    pub fn list(&self) -> impl Iterator<Item = &Remote> {
        self.remotes.values()
    }

    /// Resolve a `<remote>/<branch>` tracking name
    pub fn resolve_tracking(&self, name: &str) -> Option<ObjectId> {
        let (remote, branch) = name.split_once('/')?;
        self.remotes.get(remote)?.branches.get(branch).cloned()
    }

    /// Every hash a remote branch points at
    pub fn tracked_hashes(&self) -> Vec<ObjectId> {
        self.remotes
            .values()
            .flat_map(|remote| remote.branches.values().cloned())
            .collect()
    }

    pub(crate) fn replace(&mut self, remotes: impl IntoIterator<Item = Remote>) {
        self.remotes = remotes
            .into_iter()
            .map(|remote| (remote.name.clone(), remote))
            .collect();
    }
}
