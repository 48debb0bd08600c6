use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tvcs::{
    BranchOptions, ChangeType, CheckoutOptions, CommitOptions, LogOptions, Repository, VcsError,
};

mod common;
use common::{commit_translations, repository};

#[rstest]
fn log_walks_newest_first(mut repository: Repository) {
    let a = commit_translations(&mut repository, &[("en", "a", "1")], "one");
    let b = commit_translations(&mut repository, &[("en", "b", "2")], "two");

    let log = repository.log(LogOptions::default()).unwrap();

    let hashes = log.iter().map(|c| c.hash().clone()).collect::<Vec<_>>();
    assert_eq!(hashes.len(), 3);
    assert_eq!(hashes[0], b);
    assert_eq!(hashes[1], a);
    assert!(log[2].is_root());
}

#[rstest]
fn log_filters_and_limits(mut repository: Repository) {
    commit_translations(&mut repository, &[("en", "a", "1")], "one");
    repository.set_translation("en", "b", "2");
    repository
        .commit(
            "by grace",
            CommitOptions {
                author: Some("Grace".into()),
                email: Some("grace@example.com".into()),
                amend: false,
            },
        )
        .unwrap();
    commit_translations(&mut repository, &[("en", "c", "3")], "three");

    let limited = repository
        .log(LogOptions {
            limit: Some(2),
            ..LogOptions::default()
        })
        .unwrap();
    assert_eq!(limited.len(), 2);

    let by_grace = repository
        .log(LogOptions {
            author: Some("grace@example.com".into()),
            ..LogOptions::default()
        })
        .unwrap();
    assert_eq!(by_grace.len(), 1);
    assert_eq!(by_grace[0].message(), "by grace");

    let future = repository
        .log(LogOptions {
            since: Some(Utc::now() + Duration::days(1)),
            ..LogOptions::default()
        })
        .unwrap();
    assert!(future.is_empty());
}

#[rstest]
fn log_of_another_branch(mut repository: Repository) {
    commit_translations(&mut repository, &[("en", "a", "1")], "one");
    repository
        .branch(
            "feature",
            BranchOptions {
                from: None,
                checkout: true,
            },
        )
        .unwrap();
    commit_translations(&mut repository, &[("en", "b", "2")], "feature only");
    repository.checkout("main", CheckoutOptions::default()).unwrap();

    let feature = repository
        .log(LogOptions {
            branch: Some("feature".into()),
            ..LogOptions::default()
        })
        .unwrap();
    assert_eq!(feature[0].message(), "feature only");

    let unknown = repository.log(LogOptions {
        branch: Some("nowhere".into()),
        ..LogOptions::default()
    });
    assert!(matches!(unknown, Err(VcsError::InvalidTarget(_))));
}

#[rstest]
fn diff_between_commits(mut repository: Repository) {
    let a = commit_translations(
        &mut repository,
        &[("en", "hello", "Hi"), ("en", "bye", "Bye")],
        "one",
    );
    repository.set_translation("en", "hello", "Hey");
    repository.delete_translation("en", "bye");
    repository.set_translation("de", "hello", "Hallo");
    let b = repository.commit("two", CommitOptions::default()).unwrap();

    let changes = repository.diff(Some(a.as_ref()), Some(b.as_ref())).unwrap();

    let summary = changes
        .iter()
        .map(|c| (c.locale.as_str(), c.key.as_str(), c.change_type))
        .collect::<Vec<_>>();
    assert_eq!(
        summary,
        vec![
            ("de", "hello", ChangeType::Add),
            ("en", "bye", ChangeType::Delete),
            ("en", "hello", ChangeType::Modify),
        ]
    );
}

#[rstest]
fn diff_defaults_to_empty_tree_and_head(mut repository: Repository) {
    commit_translations(&mut repository, &[("en", "hello", "Hi")], "one");

    let changes = repository.diff(None, None).unwrap();

    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].change_type, ChangeType::Add);
    assert!(matches!(
        repository.diff(Some("nowhere"), None),
        Err(VcsError::InvalidTarget(_))
    ));
}

#[rstest]
fn diff_staged_shows_pending_work(mut repository: Repository) {
    commit_translations(&mut repository, &[("en", "hello", "Hi")], "one");
    repository.set_translation("en", "hello", "Hey");

    let staged = repository.diff_staged().unwrap();
    assert_eq!(staged.len(), 1);
    assert_eq!(staged[0].old_value.as_deref(), Some("Hi"));
}

#[rstest]
fn blame_lists_every_edit_newest_first(mut repository: Repository) {
    let first = commit_translations(&mut repository, &[("en", "hello", "Hi")], "add");
    let second = commit_translations(&mut repository, &[("en", "hello", "Hey")], "edit");
    commit_translations(&mut repository, &[("en", "other", "x")], "unrelated");
    repository.delete_translation("en", "hello");
    let third = repository.commit("remove", CommitOptions::default()).unwrap();

    let blame = repository.blame("en", "hello").unwrap();

    let entries = blame
        .iter()
        .map(|entry| (entry.commit.clone(), entry.line.as_str()))
        .collect::<Vec<_>>();
    assert_eq!(
        entries,
        vec![(third, ""), (second, "Hey"), (first, "Hi")]
    );
}

#[rstest]
fn status_reports_staged_work(mut repository: Repository) {
    commit_translations(&mut repository, &[("en", "hello", "Hi")], "one");
    repository.set_translation("en", "hello", "Hey");
    repository.set_translation("en", "bye", "Bye");
    repository.stash(None).unwrap();
    repository.set_translation("fr", "hello", "Salut");

    let status = repository.status().unwrap();

    assert_eq!(status.branch.as_deref(), Some("main"));
    assert_eq!(status.head, repository.head().unwrap());
    assert_eq!(status.staged.len(), 1);
    assert_eq!(status.stashes, 1);
    assert!(status.conflicts.is_empty());
    assert_eq!((status.ahead, status.behind), (0, 0));
    assert!(!status.is_clean());
}
