use crate::common::command::{
    head_fingerprint, init_repository_dir, run_vit_command, vit_commit, vit_merge,
};
use crate::common::file::{read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn merging_a_strict_descendant_fast_forwards(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    run_vit_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();
    run_vit_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();

    write_file(dir.path(), "feature.txt", "feature work\n");
    run_vit_command(dir.path(), &["add", "feature.txt"])
        .assert()
        .success();
    vit_commit(dir.path(), "feature work").assert().success();
    let feature_tip = head_fingerprint(dir.path());

    run_vit_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();

    vit_merge(dir.path(), "feature")
        .assert()
        .success()
        .stdout(predicate::str::contains("Current branch fast-forwarded."));

    // master's tip now equals the feature tip; no merge commit was created
    // and the current branch did not change
    assert_eq!(head_fingerprint(dir.path()), feature_tip);
    assert_eq!(read_file(dir.path(), "feature.txt"), "feature work\n");
    run_vit_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Merged").count(0));
    run_vit_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("*master"));
}

#[rstest]
fn merging_an_already_contained_branch_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    run_vit_command(dir.path(), &["branch", "behind"])
        .assert()
        .success();

    write_file(dir.path(), "a.txt", "ahead\n");
    run_vit_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    vit_commit(dir.path(), "ahead of behind").assert().success();

    vit_merge(dir.path(), "behind")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Given branch is an ancestor of the current branch.",
        ));
}
