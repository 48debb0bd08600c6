//! References (branches, HEAD, tags)
//!
//! References are human-readable names pointing into the commit graph:
//!
//! - HEAD: attached to a branch, or detached at a raw commit hash
//! - Branches: mutable pointers advanced by commit, merge and checkout
//! - Tags: immutable pointers, never moved once created
//!
//! Refs never validate that the hash they are given exists; callers resolve
//! and check targets against the database before updating a ref.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::error::{Result, VcsError};
use chrono::{DateTime, Utc};
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "target", rename_all = "lowercase")]
pub enum Head {
    Attached(BranchName),
    Detached(ObjectId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub name: BranchName,
    #[serde(rename = "headCommitHash")]
    pub head: ObjectId,
    pub created: DateTime<Utc>,
    pub author: String,
    #[new(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub name: BranchName,
    pub commit_hash: ObjectId,
    pub author: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub signed: bool,
}

#[derive(Debug, Clone)]
pub struct Refs {
    head: Head,
    branches: BTreeMap<BranchName, Branch>,
    tags: BTreeMap<BranchName, Tag>,
}

impl Refs {
    /// Refs with a single branch, checked out, pointing at `root`
    pub fn new(default_branch: Branch) -> Self {
        let head = Head::Attached(default_branch.name.clone());
        let mut branches = BTreeMap::new();
        branches.insert(default_branch.name.clone(), default_branch);

        Refs {
            head,
            branches,
            tags: BTreeMap::new(),
        }
    }

    pub(crate) fn from_parts(
        head: Head,
        branches: impl IntoIterator<Item = Branch>,
        tags: impl IntoIterator<Item = Tag>,
    ) -> Self {
        Refs {
            head,
            branches: branches.into_iter().map(|b| (b.name.clone(), b)).collect(),
            tags: tags.into_iter().map(|t| (t.name.clone(), t)).collect(),
        }
    }

    pub fn head(&self) -> &Head {
        &self.head
    }

    pub fn current_branch(&self) -> Option<&BranchName> {
        match &self.head {
            Head::Attached(name) => Some(name),
            Head::Detached(_) => None,
        }
    }

    pub fn is_current_branch(&self, branch_name: &BranchName) -> bool {
        self.current_branch() == Some(branch_name)
    }

    pub fn is_detached(&self) -> bool {
        matches!(self.head, Head::Detached(_))
    }

    /// The commit HEAD points at
    pub fn read_head(&self) -> Result<ObjectId> {
        match &self.head {
            Head::Detached(oid) => Ok(oid.clone()),
            Head::Attached(name) => self
                .branches
                .get(name)
                .map(|branch| branch.head.clone())
                .ok_or_else(|| VcsError::InvalidTarget(name.to_string())),
        }
    }

    /// Advance HEAD: moves the current branch, or the detached hash
    pub fn update_head(&mut self, oid: ObjectId) {
        match &self.head {
            Head::Attached(name) => {
                if let Some(branch) = self.branches.get_mut(name) {
                    branch.head = oid;
                }
            }
            Head::Detached(_) => self.head = Head::Detached(oid),
        }
    }

    pub fn set_head(&mut self, head: Head) {
        self.head = head;
    }

    /// Resolve `HEAD`, a branch or a tag, in that order
    pub fn read_ref(&self, name: &BranchName) -> Option<ObjectId> {
        if name.is_head() {
            return self.read_head().ok();
        }

        self.branches
            .get(name)
            .map(|branch| branch.head.clone())
            .or_else(|| self.tags.get(name).map(|tag| tag.commit_hash.clone()))
    }

    pub fn branch(&self, name: &BranchName) -> Option<&Branch> {
        self.branches.get(name)
    }

    pub fn branch_mut(&mut self, name: &BranchName) -> Option<&mut Branch> {
        self.branches.get_mut(name)
    }

    pub fn branches(&self) -> impl Iterator<Item = &Branch> {
        self.branches.values()
    }

    pub fn create_branch(&mut self, branch: Branch) -> Result<()> {
        if branch.name.is_head() || self.branches.contains_key(&branch.name) {
            return Err(VcsError::DuplicateBranch(branch.name.to_string()));
        }

        self.branches.insert(branch.name.clone(), branch);
        Ok(())
    }

    pub fn delete_branch(&mut self, name: &BranchName) -> Result<Branch> {
        if self.is_current_branch(name) {
            return Err(VcsError::CurrentBranch(name.to_string()));
        }

        self.branches
            .remove(name)
            .ok_or_else(|| VcsError::InvalidTarget(name.to_string()))
    }

    /// Move a branch pointer directly
    pub fn update_branch(&mut self, name: &BranchName, oid: ObjectId) -> Result<()> {
        let branch = self
            .branches
            .get_mut(name)
            .ok_or_else(|| VcsError::InvalidTarget(name.to_string()))?;
        branch.head = oid;
        Ok(())
    }

    pub fn tag(&self, name: &BranchName) -> Option<&Tag> {
        self.tags.get(name)
    }

    pub fn tags(&self) -> impl Iterator<Item = &Tag> {
        self.tags.values()
    }

    pub fn create_tag(&mut self, tag: Tag) -> Result<()> {
        if self.tags.contains_key(&tag.name) {
            return Err(VcsError::DuplicateTag(tag.name.to_string()));
        }

        self.tags.insert(tag.name.clone(), tag);
        Ok(())
    }

    /// Map every commit hash to the names pointing at it
    pub fn reverse_refs(&self) -> BTreeMap<ObjectId, Vec<String>> {
        let mut refs: BTreeMap<ObjectId, Vec<String>> = BTreeMap::new();

        for branch in self.branches.values() {
            refs.entry(branch.head.clone())
                .or_default()
                .push(branch.name.to_string());
        }
        for tag in self.tags.values() {
            refs.entry(tag.commit_hash.clone())
                .or_default()
                .push(format!("tag: {}", tag.name));
        }
        if let Head::Detached(oid) = &self.head {
            refs.entry(oid.clone()).or_default().push("HEAD".to_string());
        }

        refs
    }

    /// Every hash directly referenced by HEAD, a branch or a tag
    pub fn roots(&self) -> Vec<ObjectId> {
        let mut roots = self
            .branches
            .values()
            .map(|branch| branch.head.clone())
            .chain(self.tags.values().map(|tag| tag.commit_hash.clone()))
            .collect::<Vec<_>>();
        if let Ok(head) = self.read_head() {
            roots.push(head);
        }
        roots.sort();
        roots.dedup();
        roots
    }
}
