use crate::common::command::{init_repository_dir, run_vit_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn removing_the_current_branch_fails_and_leaves_the_table_unchanged(
    init_repository_dir: TempDir,
) {
    let dir = init_repository_dir;

    run_vit_command(dir.path(), &["rm-branch", "master"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cannot remove the current branch."));

    run_vit_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Branches ===\n*master\n\n"));
}

#[rstest]
fn removing_an_unknown_branch_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_vit_command(dir.path(), &["rm-branch", "ghost"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "A branch with that name does not exist.",
        ));
}

#[rstest]
fn a_removed_branch_can_no_longer_be_checked_out(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    run_vit_command(dir.path(), &["branch", "side"])
        .assert()
        .success();

    run_vit_command(dir.path(), &["rm-branch", "side"])
        .assert()
        .success();

    run_vit_command(dir.path(), &["checkout", "side"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No such branch exists."));
}
