use crate::common::command::{init_repository_dir, run_vit_command, vit_commit};
use crate::common::file::{read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn creating_a_duplicate_branch_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    run_vit_command(dir.path(), &["branch", "side"])
        .assert()
        .success();

    run_vit_command(dir.path(), &["branch", "side"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "A branch with that name already exists.",
        ));
}

#[rstest]
fn a_new_branch_points_at_the_head_commit(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    write_file(dir.path(), "a.txt", "original\n");
    run_vit_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    vit_commit(dir.path(), "original").assert().success();

    run_vit_command(dir.path(), &["branch", "side"])
        .assert()
        .success();

    // advance master, then return to the branch point
    write_file(dir.path(), "a.txt", "advanced\n");
    run_vit_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    vit_commit(dir.path(), "advanced").assert().success();

    run_vit_command(dir.path(), &["checkout", "side"])
        .assert()
        .success();
    assert_eq!(read_file(dir.path(), "a.txt"), "original\n");
}

#[rstest]
fn status_lists_branches_sorted_with_the_current_branch_starred(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    run_vit_command(dir.path(), &["branch", "zeta"])
        .assert()
        .success();
    run_vit_command(dir.path(), &["branch", "alpha"])
        .assert()
        .success();

    run_vit_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "=== Branches ===\nalpha\n*master\nzeta\n\n",
        ));
}
