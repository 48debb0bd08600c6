//! Repository events
//!
//! Every state transition publishes an [`Event`] on the repository's [`EventBus`].
//! Subscribers register per [`EventKind`] or for everything, and are called
//! synchronously, in subscription order, after the transition has been applied.

use crate::artifacts::merge::conflict::Conflict;
use crate::artifacts::objects::change::Change;
use crate::artifacts::objects::object_id::ObjectId;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    Init,
    Commit,
    BranchCreate,
    Checkout,
    MergeFastForward,
    MergeConflict,
    MergeComplete,
    ConflictResolve,
    ConflictAllResolved,
    StashSave,
    StashPop,
    TagCreate,
    RemoteAdd,
    FetchComplete,
    PushComplete,
    PullComplete,
    CherryPick,
    RebaseComplete,
    ConfigUpdate,
    TranslationChange,
    TranslationDelete,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Init => "init",
            EventKind::Commit => "commit",
            EventKind::BranchCreate => "branch:create",
            EventKind::Checkout => "checkout",
            EventKind::MergeFastForward => "merge:fast-forward",
            EventKind::MergeConflict => "merge:conflict",
            EventKind::MergeComplete => "merge:complete",
            EventKind::ConflictResolve => "conflict:resolve",
            EventKind::ConflictAllResolved => "conflict:all-resolved",
            EventKind::StashSave => "stash:save",
            EventKind::StashPop => "stash:pop",
            EventKind::TagCreate => "tag:create",
            EventKind::RemoteAdd => "remote:add",
            EventKind::FetchComplete => "fetch:complete",
            EventKind::PushComplete => "push:complete",
            EventKind::PullComplete => "pull:complete",
            EventKind::CherryPick => "cherry-pick",
            EventKind::RebaseComplete => "rebase:complete",
            EventKind::ConfigUpdate => "config:update",
            EventKind::TranslationChange => "translation:change",
            EventKind::TranslationDelete => "translation:delete",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Event {
    Init { branch: String, head: ObjectId },
    Commit { hash: ObjectId, message: String, branch: Option<String> },
    BranchCreate { name: String, head: ObjectId },
    Checkout { target: String, head: ObjectId, detached: bool },
    MergeFastForward { source: String, head: ObjectId },
    MergeConflict { source: String, conflicts: Vec<Conflict> },
    MergeComplete { source: String, commit: Option<ObjectId> },
    ConflictResolve { conflict: Conflict },
    ConflictAllResolved,
    StashSave { id: ObjectId, message: String },
    StashPop { id: ObjectId },
    TagCreate { name: String, commit: ObjectId },
    RemoteAdd { name: String, url: String },
    FetchComplete { remote: String },
    PushComplete { remote: String, branch: String, head: ObjectId },
    PullComplete { remote: String, branch: String },
    CherryPick { source: ObjectId, commit: ObjectId },
    RebaseComplete { onto: String, head: ObjectId },
    ConfigUpdate,
    TranslationChange { change: Change },
    TranslationDelete { change: Change },
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Init { .. } => EventKind::Init,
            Event::Commit { .. } => EventKind::Commit,
            Event::BranchCreate { .. } => EventKind::BranchCreate,
            Event::Checkout { .. } => EventKind::Checkout,
            Event::MergeFastForward { .. } => EventKind::MergeFastForward,
            Event::MergeConflict { .. } => EventKind::MergeConflict,
            Event::MergeComplete { .. } => EventKind::MergeComplete,
            Event::ConflictResolve { .. } => EventKind::ConflictResolve,
            Event::ConflictAllResolved => EventKind::ConflictAllResolved,
            Event::StashSave { .. } => EventKind::StashSave,
            Event::StashPop { .. } => EventKind::StashPop,
            Event::TagCreate { .. } => EventKind::TagCreate,
            Event::RemoteAdd { .. } => EventKind::RemoteAdd,
            Event::FetchComplete { .. } => EventKind::FetchComplete,
            Event::PushComplete { .. } => EventKind::PushComplete,
            Event::PullComplete { .. } => EventKind::PullComplete,
            Event::CherryPick { .. } => EventKind::CherryPick,
            Event::RebaseComplete { .. } => EventKind::RebaseComplete,
            Event::ConfigUpdate => EventKind::ConfigUpdate,
            Event::TranslationChange { .. } => EventKind::TranslationChange,
            Event::TranslationDelete { .. } => EventKind::TranslationDelete,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

pub type EventHandler = Box<dyn Fn(&Event) + Send + Sync>;

struct Subscription {
    id: SubscriptionId,
    kind: Option<EventKind>,
    handler: EventHandler,
}

#[derive(Default)]
pub struct EventBus {
    subscriptions: BTreeMap<SubscriptionId, Subscription>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(
        &mut self,
        kind: EventKind,
        handler: impl Fn(&Event) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.register(Some(kind), Box::new(handler))
    }

    pub fn subscribe_all(
        &mut self,
        handler: impl Fn(&Event) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.register(None, Box::new(handler))
    }

    /// Returns false if the subscription was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscriptions.remove(&id).is_some()
    }

    pub fn emit(&self, event: Event) {
        let kind = event.kind();
        tracing::trace!(event = %kind, "emit");

        self.subscriptions
            .values()
            .filter(|subscription| subscription.kind.is_none_or(|k| k == kind))
            .for_each(|subscription| (subscription.handler)(&event));
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    fn register(&mut self, kind: Option<EventKind>, handler: EventHandler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions
            .insert(id, Subscription { id, kind, handler });
        id
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field(
                "subscriptions",
                &self
                    .subscriptions
                    .values()
                    .map(|s| (s.id, s.kind.map(|k| k.as_str()).unwrap_or("*")))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
