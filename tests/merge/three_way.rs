use crate::common::command::{init_repository_dir, run_vit_command, vit_commit, vit_merge};
use crate::common::file::{file_exists, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

/// Set up a fork point tracking f.txt and g.txt, with a branch `other`
fn forked_repository(dir: &std::path::Path) {
    write_file(dir, "f.txt", "f base\n");
    write_file(dir, "g.txt", "g base\n");
    run_vit_command(dir, &["add", "f.txt"]).assert().success();
    run_vit_command(dir, &["add", "g.txt"]).assert().success();
    vit_commit(dir, "fork point").assert().success();
    run_vit_command(dir, &["branch", "other"]).assert().success();
}

#[rstest]
fn changes_on_each_side_combine_without_conflict(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    forked_repository(dir.path());

    // master edits f, other edits g
    write_file(dir.path(), "f.txt", "f on master\n");
    run_vit_command(dir.path(), &["add", "f.txt"])
        .assert()
        .success();
    vit_commit(dir.path(), "master edits f").assert().success();

    run_vit_command(dir.path(), &["checkout", "other"])
        .assert()
        .success();
    write_file(dir.path(), "g.txt", "g on other\n");
    run_vit_command(dir.path(), &["add", "g.txt"])
        .assert()
        .success();
    vit_commit(dir.path(), "other edits g").assert().success();

    run_vit_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();
    vit_merge(dir.path(), "other")
        .assert()
        .success()
        .stdout(predicate::str::contains("Encountered a merge conflict.").count(0));

    assert_eq!(read_file(dir.path(), "f.txt"), "f on master\n");
    assert_eq!(read_file(dir.path(), "g.txt"), "g on other\n");
    run_vit_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Merged other into master."));
}

#[rstest]
fn a_deletion_on_the_target_side_propagates(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    forked_repository(dir.path());

    run_vit_command(dir.path(), &["checkout", "other"])
        .assert()
        .success();
    run_vit_command(dir.path(), &["rm", "g.txt"])
        .assert()
        .success();
    vit_commit(dir.path(), "other drops g").assert().success();

    run_vit_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();
    vit_merge(dir.path(), "other").assert().success();

    // g is gone from the working tree and from the merge commit
    assert!(!file_exists(dir.path(), "g.txt"));
    run_vit_command(dir.path(), &["checkout", "--", "g.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("File does not exist in that commit."));
}

#[rstest]
fn a_file_added_on_the_target_side_is_checked_out_and_committed(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    forked_repository(dir.path());

    // a master-side commit keeps the histories divergent
    write_file(dir.path(), "f.txt", "f on master\n");
    run_vit_command(dir.path(), &["add", "f.txt"])
        .assert()
        .success();
    vit_commit(dir.path(), "master edits f").assert().success();

    run_vit_command(dir.path(), &["checkout", "other"])
        .assert()
        .success();
    write_file(dir.path(), "h.txt", "h on other\n");
    run_vit_command(dir.path(), &["add", "h.txt"])
        .assert()
        .success();
    vit_commit(dir.path(), "other adds h").assert().success();

    run_vit_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();
    vit_merge(dir.path(), "other").assert().success();

    assert_eq!(read_file(dir.path(), "h.txt"), "h on other\n");
}

/// Delete-vs-modify: the current side kept editing a file the target
/// deleted, so the conflict's target section is empty
#[rstest]
fn a_local_edit_against_a_target_deletion_conflicts(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    forked_repository(dir.path());

    write_file(dir.path(), "g.txt", "g edited on master\n");
    run_vit_command(dir.path(), &["add", "g.txt"])
        .assert()
        .success();
    vit_commit(dir.path(), "master edits g").assert().success();

    run_vit_command(dir.path(), &["checkout", "other"])
        .assert()
        .success();
    run_vit_command(dir.path(), &["rm", "g.txt"])
        .assert()
        .success();
    vit_commit(dir.path(), "other drops g").assert().success();

    run_vit_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();
    vit_merge(dir.path(), "other")
        .assert()
        .success()
        .stdout(predicate::str::contains("Encountered a merge conflict."));

    assert_eq!(
        read_file(dir.path(), "g.txt"),
        "<<<<<<< HEAD\ng edited on master\n=======\n>>>>>>>\n"
    );
}
