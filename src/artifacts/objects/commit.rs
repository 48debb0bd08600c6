//! Commit object
//!
//! Commits are immutable snapshots in a single-parent chain. They contain:
//! - The parent commit ID (none for the root commit)
//! - Author information and timestamp
//! - Commit message
//! - The change set introduced on top of the parent
//! - A hash of the full working tree at commit time (integrity only)
//!
//! ## Identity
//!
//! The commit hash covers the message and the high-resolution timestamp only.
//! Two commits with the same content but different timestamps never collide.

use crate::artifacts::core::commit_hash;
use crate::artifacts::objects::change::Change;
use crate::artifacts::objects::object_id::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author information
///
/// Contains name, email, and timestamp.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Author {
    #[serde(rename = "author")]
    name: String,
    email: String,
    timestamp: DateTime<Utc>,
}

impl Author {
    /// Create a new author with a specific timestamp
    ///
    /// # Arguments
    ///
    /// * `name` - Author's name
    /// * `email` - Author's email address
    /// * `timestamp` - Authoring time
    pub fn new(name: String, email: String, timestamp: DateTime<Utc>) -> Self {
        Author {
            name,
            email,
            timestamp,
        }
    }

    /// Load author name and email from environment variables
    ///
    /// Reads TVCS_AUTHOR_NAME and TVCS_AUTHOR_EMAIL.
    ///
    /// # Returns
    ///
    /// `(name, email)` when both are set
    pub fn load_from_env() -> anyhow::Result<(String, String)> {
        use anyhow::Context;

        let name = std::env::var("TVCS_AUTHOR_NAME").context("TVCS_AUTHOR_NAME not set")?;
        let email = std::env::var("TVCS_AUTHOR_EMAIL").context("TVCS_AUTHOR_EMAIL not set")?;
        Ok((name, email))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commit {
    hash: ObjectId,
    parent_hash: Option<ObjectId>,
    #[serde(flatten)]
    author: Author,
    message: String,
    changes: Vec<Change>,
    tree_hash: ObjectId,
}

impl Commit {
    pub fn new(
        parent_hash: Option<ObjectId>,
        author: Author,
        message: String,
        changes: Vec<Change>,
        tree_hash: ObjectId,
    ) -> Self {
        Commit {
            hash: commit_hash(&message, &author.timestamp),
            parent_hash,
            author,
            message,
            changes,
            tree_hash,
        }
    }

    pub fn hash(&self) -> &ObjectId {
        &self.hash
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent_hash.as_ref()
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.author.timestamp
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    pub fn tree_hash(&self) -> &ObjectId {
        &self.tree_hash
    }

    /// First line of the commit message
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or_default().to_string()
    }

    pub fn is_root(&self) -> bool {
        self.parent_hash.is_none()
    }

    /// The last change in this commit touching `locale:key`, if any
    pub fn change_for(&self, locale: &str, key: &str) -> Option<&Change> {
        self.changes.iter().rev().find(|c| c.touches(locale, key))
    }

    pub fn touches(&self, locale: &str, key: &str) -> bool {
        self.change_for(locale, key).is_some()
    }

    pub fn slim(&self) -> SlimCommit {
        SlimCommit {
            oid: self.hash.clone(),
            parent: self.parent_hash.clone(),
            timestamp: self.author.timestamp,
        }
    }
}

/// Slim representation of a commit
///
/// Contains only what ancestry walks need.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SlimCommit {
    pub oid: ObjectId,
    pub parent: Option<ObjectId>,
    pub timestamp: DateTime<Utc>,
}
