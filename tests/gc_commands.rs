use pretty_assertions::assert_eq;
use tvcs::{BranchOptions, CheckoutOptions, Config, Repository, TagOptions};

mod common;
use common::{commit_translations, repository_with};

fn small_repository(max_commits: usize) -> Repository {
    repository_with(Config {
        max_commits,
        ..Config::default()
    })
}

/// main: root <- a, and an abandoned `tmp` branch: a <- x <- y
fn abandoned_branch(repository: &mut Repository) -> (Vec<tvcs::ObjectId>, Vec<tvcs::ObjectId>) {
    let a = commit_translations(repository, &[("en", "a", "1")], "a");
    repository
        .branch(
            "tmp",
            BranchOptions {
                from: None,
                checkout: true,
            },
        )
        .unwrap();
    let x = commit_translations(repository, &[("en", "x", "1")], "x");
    let y = commit_translations(repository, &[("en", "y", "1")], "y");
    repository.checkout("main", CheckoutOptions::default()).unwrap();
    (vec![repository.log(Default::default()).unwrap()[1].hash().clone(), a], vec![x, y])
}

#[test]
fn nothing_is_collected_under_the_ceiling() {
    let mut repository = small_repository(100);
    abandoned_branch(&mut repository);
    repository.delete_branch("tmp").unwrap();

    let report = repository.gc().unwrap();

    assert!(!report.did_collect());
    assert_eq!(report.retained, 4);
}

#[test]
fn unreachable_tips_are_swept_first() {
    let mut repository = small_repository(3);
    let (kept, abandoned) = abandoned_branch(&mut repository);
    repository.delete_branch("tmp").unwrap();

    let dry_run = repository.gc_dry_run().unwrap();
    assert_eq!(dry_run.removed_commits, vec![abandoned[1].clone()]);
    assert_eq!(repository.database().len(), 4);

    let report = repository.gc().unwrap();
    assert_eq!(report, dry_run);
    assert_eq!(report.total_before, 4);
    assert_eq!(report.retained, 3);
    assert!(!repository.database().contains(&abandoned[1]));
    assert!(repository.database().contains(&abandoned[0]));
    assert!(kept.iter().all(|oid| repository.database().contains(oid)));
}

#[test]
fn reachable_history_is_never_swept() {
    let mut repository = small_repository(1);
    for n in 0..5 {
        commit_translations(&mut repository, &[("en", "key", &n.to_string())], "edit");
    }

    let report = repository.gc().unwrap();

    assert!(report.removed_commits.is_empty());
    assert_eq!(repository.database().len(), 6);
    assert_eq!(repository.log(Default::default()).unwrap().len(), 6);
}

#[test]
fn tags_keep_history_alive() {
    let mut repository = small_repository(2);
    let (_, abandoned) = abandoned_branch(&mut repository);
    repository
        .tag(
            "keep",
            TagOptions {
                target: Some(abandoned[1].to_string()),
                ..TagOptions::default()
            },
        )
        .unwrap();
    repository.delete_branch("tmp").unwrap();

    let report = repository.gc().unwrap();

    assert!(report.removed_commits.is_empty());
    assert!(repository.database().contains(&abandoned[0]));
}

#[test]
fn commits_past_the_ceiling_trigger_collection() {
    let mut repository = small_repository(4);
    let (_, abandoned) = abandoned_branch(&mut repository);
    repository.delete_branch("tmp").unwrap();

    commit_translations(&mut repository, &[("en", "b", "1")], "b");

    assert_eq!(repository.database().len(), 4);
    assert!(!repository.database().contains(&abandoned[1]));
    assert!(repository.database().contains(&abandoned[0]));
}

#[test]
fn partially_swept_repository_survives_export_and_import() {
    let mut repository = small_repository(4);
    abandoned_branch(&mut repository);
    repository.delete_branch("tmp").unwrap();
    commit_translations(&mut repository, &[("en", "b", "1")], "b");
    assert_eq!(repository.database().len(), 4);

    let mut restored = Repository::new(Config::default()).unwrap();
    restored.import(&repository.export().unwrap()).unwrap();

    assert_eq!(restored.snapshot(), repository.snapshot());
    assert_eq!(restored.translation("en", "b"), Some("1"));
}
