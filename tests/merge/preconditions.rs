use crate::common::command::{init_repository_dir, run_vit_command, vit_commit, vit_merge};
use crate::common::file::{read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn merging_an_unknown_branch_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    vit_merge(dir.path(), "ghost")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "A branch with that name does not exist.",
        ));
}

#[rstest]
fn merging_the_current_branch_into_itself_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    vit_merge(dir.path(), "master")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cannot merge a branch with itself."));
}

#[rstest]
fn merging_with_staged_changes_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    run_vit_command(dir.path(), &["branch", "other"])
        .assert()
        .success();

    write_file(dir.path(), "a.txt", "pending\n");
    run_vit_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();

    vit_merge(dir.path(), "other")
        .assert()
        .success()
        .stdout(predicate::str::contains("You have uncommitted changes."));
}

#[rstest]
fn merging_over_an_untracked_file_the_target_tracks_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    run_vit_command(dir.path(), &["branch", "other"])
        .assert()
        .success();
    run_vit_command(dir.path(), &["checkout", "other"])
        .assert()
        .success();

    write_file(dir.path(), "a.txt", "tracked on other\n");
    run_vit_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    vit_commit(dir.path(), "other tracks a").assert().success();

    // back on master the file is absent; recreate it untracked
    run_vit_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();
    write_file(dir.path(), "a.txt", "local junk\n");

    vit_merge(dir.path(), "other")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "There is an untracked file in the way; delete it, or add and commit it first.",
        ));
    assert_eq!(read_file(dir.path(), "a.txt"), "local junk\n");
}
