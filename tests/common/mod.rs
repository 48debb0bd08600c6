#![allow(dead_code)]

use rstest::fixture;
use std::sync::{Arc, Mutex};
use tvcs::{CommitOptions, Config, ConflictStrategy, EventBus, EventKind, ObjectId, Repository};

#[fixture]
pub fn repository() -> Repository {
    Repository::new(Config::default()).unwrap()
}

pub fn repository_with(config: Config) -> Repository {
    Repository::new(config).unwrap()
}

pub fn config_with_policy(policy: ConflictStrategy) -> Config {
    Config {
        conflict_resolution: policy,
        ..Config::default()
    }
}

/// Set every `(locale, key, value)` and commit them
pub fn commit_translations(
    repository: &mut Repository,
    entries: &[(&str, &str, &str)],
    message: &str,
) -> ObjectId {
    for (locale, key, value) in entries {
        repository.set_translation(locale, key, *value);
    }
    repository.commit(message, CommitOptions::default()).unwrap()
}

/// Collected event kinds, in emission order
#[derive(Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<EventKind>>>);

impl EventLog {
    pub fn kinds(&self) -> Vec<EventKind> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.kinds().into_iter().filter(|k| *k == kind).count()
    }
}

/// A repository whose every event lands in the returned log
pub fn observed_repository(config: Config) -> (Repository, EventLog) {
    let log = EventLog::default();
    let sink = log.0.clone();

    let mut bus = EventBus::new();
    bus.subscribe_all(move |event| sink.lock().unwrap().push(event.kind()));

    (Repository::with_event_bus(config, bus).unwrap(), log)
}

/// root <- C1 (hello=Hi) on main, `feature` branched at C1
///
/// Returns the repository checked out on `main` and C1.
pub fn branched_repository(config: Config) -> (Repository, ObjectId) {
    let mut repository = repository_with(config);
    let c1 = commit_translations(&mut repository, &[("en", "hello", "Hi")], "add hello");
    repository
        .branch("feature", tvcs::BranchOptions::default())
        .unwrap();
    (repository, c1)
}

/// Diverge `main` and `feature` on `en:hello` and leave `main` checked out
pub fn conflicting_repository(config: Config) -> Repository {
    let (mut repository, _) = branched_repository(config);

    repository
        .checkout("feature", tvcs::CheckoutOptions::default())
        .unwrap();
    commit_translations(&mut repository, &[("en", "hello", "Hey")], "feature hello");

    repository
        .checkout("main", tvcs::CheckoutOptions::default())
        .unwrap();
    commit_translations(&mut repository, &[("en", "hello", "Hello")], "main hello");

    repository
}
