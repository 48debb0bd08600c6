use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::{ANCESTOR_REGEX, PARENT_REGEX, REF_ALIASES};
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;

/// A revision expression naming one commit.
///
/// Supported forms:
/// - Branch names: `main`, `feature/greeting`
/// - `HEAD` and its alias `@`
/// - Tags: `v1.0`
/// - Remote-tracking names: `origin/main`
/// - Full or abbreviated (4-40 hex characters) commit hashes
/// - Parent notation: `<revision>^`
/// - Ancestor notation: `<revision>~<n>`
///
/// Hash-like strings parse as `Ref` and are only read as hashes when no ref with that
/// name exists, so refs always win over hashes.
#[derive(Debug, Clone)]
pub enum Revision {
    /// A branch, tag, remote-tracking name, `HEAD` or a commit hash
    Ref(BranchName),
    /// The Nth ancestor of a revision (e.g., HEAD~3)
    Ancestor(Box<Revision>, usize),
    /// The parent of a revision (e.g., HEAD^)
    Parent(Box<Revision>),
}

impl Revision {
    pub fn resolve(&self, repository: &Repository) -> anyhow::Result<ObjectId> {
        match self {
            Revision::Ref(name) => Self::resolve_ref(name, repository),
            Revision::Parent(base_revision) => {
                Self::resolve_commit_parent(&base_revision.resolve(repository)?, repository)
            }
            Revision::Ancestor(base_revision, generations) => {
                let mut oid = base_revision.resolve(repository)?;
                for _ in 0..*generations {
                    oid = Self::resolve_commit_parent(&oid, repository)?;
                }

                Ok(oid)
            }
        }
    }

    fn resolve_ref(name: &BranchName, repository: &Repository) -> anyhow::Result<ObjectId> {
        if let Some(oid) = repository.refs().read_ref(name) {
            return Ok(oid);
        }

        if let Some(oid) = repository.remotes().resolve_tracking(name.as_ref()) {
            return Ok(oid);
        }

        if Self::looks_like_oid(name.as_ref()) {
            Self::resolve_oid(name.as_ref(), repository)
        } else {
            Err(anyhow::anyhow!("branch {} not found", name))
        }
    }

    fn resolve_commit_parent(oid: &ObjectId, repository: &Repository) -> anyhow::Result<ObjectId> {
        let commit = repository
            .database()
            .load(oid)
            .with_context(|| format!("commit {} not found", oid))?;

        commit
            .parent()
            .cloned()
            .with_context(|| format!("commit {} has no parent", oid.to_short_oid()))
    }

    fn resolve_oid(oid_str: &str, repository: &Repository) -> anyhow::Result<ObjectId> {
        if oid_str.len() == OBJECT_ID_LENGTH {
            let oid = ObjectId::try_parse(oid_str.to_string())?;
            if !repository.database().contains(&oid) {
                anyhow::bail!("commit {} not found", oid);
            }
            return Ok(oid);
        }

        let matches = repository.database().find_by_prefix(oid_str);

        match matches.as_slice() {
            [] => anyhow::bail!("ambiguous argument '{}': unknown revision", oid_str),
            [oid] => Ok(oid.clone()),
            candidates => {
                let mut error_msg = format!(
                    "short SHA1 {} is ambiguous\nhint: The candidates are:",
                    oid_str
                );
                for oid in candidates {
                    error_msg.push_str(&format!("\nhint:   {} commit", oid.to_short_oid()));
                }
                anyhow::bail!(error_msg)
            }
        }
    }

    pub fn try_parse(revision: &str) -> anyhow::Result<Revision> {
        let parent_regex = regex::Regex::new(PARENT_REGEX)
            .with_context(|| format!("invalid parent regex: {PARENT_REGEX}"))?;
        let ancestor_regex = regex::Regex::new(ANCESTOR_REGEX)
            .with_context(|| format!("invalid ancestor regex: {ANCESTOR_REGEX}"))?;

        if let Some(caps) = parent_regex.captures(revision) {
            let base_revision = Self::try_parse(&caps[1])?;

            Ok(Revision::Parent(Box::new(base_revision)))
        } else if let Some(caps) = ancestor_regex.captures(revision) {
            let generations: usize = caps[2]
                .parse()
                .with_context(|| format!("failed to parse generations in revision: {revision}"))?;
            let base_revision = Self::try_parse(&caps[1])?;

            Ok(Revision::Ancestor(Box::new(base_revision), generations))
        } else {
            let resolved_name = *REF_ALIASES.get(revision).unwrap_or(&revision);
            let branch_name = BranchName::try_parse(resolved_name.to_string())?;
            Ok(Revision::Ref(branch_name))
        }
    }

    fn looks_like_oid(s: &str) -> bool {
        // At least 4 characters, like git's minimum abbreviation
        s.len() >= 4 && s.len() <= OBJECT_ID_LENGTH && s.chars().all(|c| c.is_ascii_hexdigit())
    }
}
