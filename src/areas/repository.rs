use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::{Branch, Refs};
use crate::areas::remotes::Remotes;
use crate::areas::stash::StashStack;
use crate::areas::working_tree::WorkingTree;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::checkout::migration::tree_at;
use crate::artifacts::merge::bca_finder::BCAFinder;
use crate::artifacts::merge::conflict::Conflict;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::remote::transport::{RemoteTransport, SimulatedTransport};
use crate::config::Config;
use crate::error::{Result, VcsError};
use crate::events::{Event, EventBus};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

pub const ROOT_COMMIT_MESSAGE: &str = "Initial commit";

/// Conflicts left by the last merge
///
/// `applied` is false when the merge was refused (auto-merge off): the conflicts are
/// only a report and local state was never touched.
#[derive(Debug, Clone)]
pub(crate) struct PendingMerge {
    pub(crate) source: String,
    pub(crate) conflicts: Vec<Conflict>,
    pub(crate) applied: bool,
}

/// An independently owned version-control engine
///
/// Everything lives in memory. Construction creates the root commit on the default
/// branch and checks it out. The repository assumes a single writer; wrap it in a
/// lock to share it between threads.
pub struct Repository {
    pub(crate) config: Config,
    pub(crate) working_tree: WorkingTree,
    pub(crate) index: Index,
    pub(crate) database: Database,
    pub(crate) refs: Refs,
    pub(crate) stashes: StashStack,
    pub(crate) remotes: Remotes,
    pub(crate) pending_merge: Option<PendingMerge>,
    events: EventBus,
    transport: Arc<dyn RemoteTransport>,
    last_timestamp: Option<DateTime<Utc>>,
}

impl Repository {
    pub fn new(config: Config) -> Result<Self> {
        Self::with_event_bus(config, EventBus::new())
    }

    /// Build a repository publishing on an existing bus, so `init` can be observed
    pub fn with_event_bus(config: Config, events: EventBus) -> Result<Self> {
        let default_branch = BranchName::try_parse(config.default_branch.clone())
            .map_err(|_| VcsError::InvalidBranchName(config.default_branch.clone()))?;

        let transport = Arc::new(SimulatedTransport::new(std::time::Duration::from_millis(
            config.remote_latency_ms,
        )));
        let created = Utc::now();
        let author = Author::new(config.author.clone(), config.email.clone(), created);
        let working_tree = WorkingTree::new();
        let root = Commit::new(
            None,
            author,
            ROOT_COMMIT_MESSAGE.to_string(),
            vec![],
            working_tree.tree_hash(),
        );

        let mut database = Database::new();
        let root_oid = database.store(root);
        let refs = Refs::new(Branch::new(
            default_branch.clone(),
            root_oid.clone(),
            created,
            config.author.clone(),
        ));

        let repository = Repository {
            index: Index::new(config.max_staged),
            stashes: StashStack::new(config.max_stashes),
            remotes: Remotes::new(),
            pending_merge: None,
            working_tree,
            database,
            refs,
            events,
            transport,
            last_timestamp: Some(created),
            config,
        };

        tracing::info!(branch = %default_branch, root = %root_oid, "initialized repository");
        repository.emit(Event::Init {
            branch: default_branch.to_string(),
            head: root_oid,
        });

        Ok(repository)
    }

    /// Replace the remote transport
    pub fn with_transport(mut self, transport: Arc<dyn RemoteTransport>) -> Self {
        self.transport = transport;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn working_tree(&self) -> &WorkingTree {
        &self.working_tree
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn remotes(&self) -> &Remotes {
        &self.remotes
    }

    pub fn stashes(&self) -> &StashStack {
        &self.stashes
    }

    pub fn events(&mut self) -> &mut EventBus {
        &mut self.events
    }

    pub(crate) fn transport(&self) -> Arc<dyn RemoteTransport> {
        self.transport.clone()
    }

    /// The commit HEAD points at
    pub fn head(&self) -> Result<ObjectId> {
        self.refs.read_head()
    }

    /// The checked-out branch, `None` when HEAD is detached
    pub fn current_branch(&self) -> Option<&BranchName> {
        self.refs.current_branch()
    }

    pub(crate) fn emit(&self, event: Event) {
        self.events.emit(event);
    }

    /// Current time, strictly later than any timestamp this repository handed out
    pub(crate) fn now(&mut self) -> DateTime<Utc> {
        let mut now = Utc::now();
        if let Some(last) = self.last_timestamp {
            if now <= last {
                now = last + Duration::nanoseconds(1);
            }
        }
        self.last_timestamp = Some(now);
        now
    }

    /// Author for a new commit: explicit values, then the environment, then the config
    pub(crate) fn author(&mut self, name: Option<String>, email: Option<String>) -> Author {
        let (env_name, env_email) = Author::load_from_env()
            .map(|(name, email)| (Some(name), Some(email)))
            .unwrap_or_default();

        let name = name.or(env_name).unwrap_or_else(|| self.config.author.clone());
        let email = email.or(env_email).unwrap_or_else(|| self.config.email.clone());
        Author::new(name, email, self.now())
    }

    /// Resolve a revision expression to an existing commit
    pub fn resolve_revision(&self, expression: &str) -> Result<ObjectId> {
        Revision::try_parse(expression)
            .and_then(|revision| revision.resolve(self))
            .map_err(|error| {
                tracing::debug!(expression, error = %error, "revision did not resolve");
                VcsError::InvalidTarget(expression.to_string())
            })
    }

    /// Tree at HEAD, without staged changes
    pub(crate) fn head_tree(&self) -> Result<WorkingTree> {
        tree_at(&self.database, Some(&self.head()?))
    }

    pub(crate) fn common_ancestor(&self, ours: &ObjectId, theirs: &ObjectId) -> Option<ObjectId> {
        BCAFinder::new(|oid: &ObjectId| self.database.slim_commit(oid))
            .find_best_common_ancestor(ours, theirs)
    }
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("head", self.refs.head())
            .field("commits", &self.database.len())
            .field("staged", &self.index.len())
            .field("stashes", &self.stashes.len())
            .finish_non_exhaustive()
    }
}
