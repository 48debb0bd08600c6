use pretty_assertions::assert_eq;
use rstest::rstest;
use tvcs::{Config, EventKind, Repository, VcsError};

mod common;
use common::{commit_translations, observed_repository, repository, repository_with};

#[rstest]
fn stash_then_pop_is_a_round_trip(mut repository: Repository) {
    commit_translations(&mut repository, &[("en", "hello", "Hi")], "add hello");
    repository.set_translation("en", "hello", "Hey");
    repository.set_translation("en", "bye", "Bye");
    repository.delete_translation("en", "hello");
    let tree = repository.working_tree().clone();
    let staged = repository.index().changes();

    repository.stash(None).unwrap();
    assert!(repository.index().is_empty());
    assert_eq!(repository.translation("en", "hello"), Some("Hi"));
    assert_eq!(repository.translation("en", "bye"), None);

    repository.stash_pop(0).unwrap();
    assert_eq!(repository.working_tree(), &tree);
    assert_eq!(repository.index().changes(), staged);
}

#[rstest]
fn stash_without_staged_changes_fails(mut repository: Repository) {
    assert!(matches!(repository.stash(None), Err(VcsError::EmptyStash)));
}

#[rstest]
fn default_message_names_the_branch(mut repository: Repository) {
    repository.set_translation("en", "hello", "Hi");
    repository.stash(None).unwrap();

    let stashes = repository.stash_list();
    assert_eq!(stashes[0].message, "WIP on main");
    assert_eq!(stashes[0].originating_branch.as_deref(), Some("main"));
}

#[rstest]
fn pop_out_of_range_fails(mut repository: Repository) {
    repository.set_translation("en", "hello", "Hi");
    repository.stash(Some("one")).unwrap();

    let result = repository.stash_pop(3);

    assert!(matches!(
        result,
        Err(VcsError::InvalidStashIndex { index: 3, len: 1 })
    ));
    assert_eq!(repository.stashes().len(), 1);
}

#[rstest]
fn newest_stash_is_index_zero(mut repository: Repository) {
    repository.set_translation("en", "a", "1");
    repository.stash(Some("first")).unwrap();
    repository.set_translation("en", "b", "2");
    repository.stash(Some("second")).unwrap();

    let popped = repository.stash_pop(1).unwrap();

    assert_eq!(popped.message, "first");
    assert_eq!(repository.translation("en", "a"), Some("1"));
    assert_eq!(repository.stash_list()[0].message, "second");
}

#[test]
fn stash_stack_is_bounded() {
    let mut repository = repository_with(Config {
        max_stashes: 2,
        ..Config::default()
    });
    for n in 0..3 {
        repository.set_translation("en", "key", format!("value {n}"));
        repository.stash(Some(&format!("stash {n}"))).unwrap();
    }

    let messages = repository
        .stash_list()
        .into_iter()
        .map(|stash| stash.message.clone())
        .collect::<Vec<_>>();
    assert_eq!(messages, vec!["stash 2", "stash 1"]);
}

#[test]
fn stash_events_are_emitted() {
    let (mut repository, events) = observed_repository(Config::default());
    repository.set_translation("en", "hello", "Hi");
    repository.stash(None).unwrap();
    repository.stash_pop(0).unwrap();

    assert_eq!(events.count(EventKind::StashSave), 1);
    assert_eq!(events.count(EventKind::StashPop), 1);
}
