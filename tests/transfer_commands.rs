use pretty_assertions::assert_eq;
use rstest::rstest;
use tvcs::{
    BranchOptions, CheckoutOptions, Config, Head, Repository, RepositorySnapshot, TagOptions,
    VcsError,
};

mod common;
use common::{commit_translations, repository};

fn populated(mut repository: Repository) -> Repository {
    commit_translations(&mut repository, &[("en", "hello", "Hi")], "add hello");
    repository
        .branch(
            "feature",
            BranchOptions {
                from: None,
                checkout: true,
            },
        )
        .unwrap();
    commit_translations(&mut repository, &[("de", "hello", "Hallo")], "german");
    repository.tag("v1", TagOptions::default()).unwrap();
    repository.set_translation("fr", "hello", "Salut");
    repository.stash(Some("french")).unwrap();
    repository.add_remote("origin", "memory://origin").unwrap();
    repository
}

#[rstest]
fn export_then_import_reproduces_the_repository(repository: Repository) {
    let source = populated(repository);
    let json = source.export().unwrap();

    let mut target = Repository::new(Config::default()).unwrap();
    target.import(&json).unwrap();

    assert_eq!(target.database().len(), source.database().len());
    assert_eq!(target.branches(), source.branches());
    assert_eq!(target.tags(), source.tags());
    assert_eq!(target.stash_list(), source.stash_list());
    assert_eq!(target.remotes().list().count(), 1);
    assert_eq!(target.current_branch().unwrap().as_ref(), "main");
    assert_eq!(target.translation("en", "hello"), Some("Hi"));
    assert_eq!(target.translation("de", "hello"), None);

    target.checkout("feature", CheckoutOptions::default()).unwrap();
    assert_eq!(target.translation("de", "hello"), Some("Hallo"));
    assert_eq!(target.snapshot(), source.snapshot());
}

#[rstest]
fn unsupported_version_is_rejected(repository: Repository) {
    let mut snapshot = repository.snapshot();
    snapshot.version = 2;
    let json = serde_json::to_string(&snapshot).unwrap();

    let mut target = Repository::new(Config::default()).unwrap();
    let head = target.head().unwrap();

    assert!(matches!(
        target.import(&json),
        Err(VcsError::UnsupportedVersion(2))
    ));
    assert_eq!(target.head().unwrap(), head);
}

#[rstest]
fn dangling_refs_are_rejected(repository: Repository) {
    let mut snapshot = repository.snapshot();
    snapshot.commits.clear();
    let json = serde_json::to_string(&snapshot).unwrap();

    let mut target = Repository::new(Config::default()).unwrap();
    assert!(matches!(
        target.import(&json),
        Err(VcsError::InvalidCommitHash(_))
    ));
}

#[rstest]
fn missing_default_branch_is_rejected(repository: Repository) {
    let mut snapshot: RepositorySnapshot = repository.snapshot();
    snapshot.config.default_branch = "trunk".into();
    let json = serde_json::to_string(&snapshot).unwrap();

    let mut target = Repository::new(Config::default()).unwrap();
    assert!(matches!(target.import(&json), Err(VcsError::InvalidTarget(_))));
}

#[rstest]
fn import_discards_local_work(repository: Repository) {
    let json = repository.export().unwrap();
    let mut target = Repository::new(Config::default()).unwrap();
    target
        .checkout(
            "scratch",
            CheckoutOptions {
                force: false,
                create_new: true,
            },
        )
        .unwrap();
    target.set_translation("en", "draft", "x");

    target.import(&json).unwrap();

    assert!(target.index().is_empty());
    assert_eq!(target.refs().head(), &Head::Attached("main".to_string().try_into().unwrap()));
    assert_eq!(target.branches().len(), 1);
}

#[test]
fn malformed_documents_fail_to_parse() {
    let mut target = Repository::new(Config::default()).unwrap();
    assert!(matches!(
        target.import("{not json"),
        Err(VcsError::Serialization(_))
    ));
}
