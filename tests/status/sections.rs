use crate::common::command::{init_repository_dir, run_vit_command, vit_commit};
use crate::common::file::{remove_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn status_output(dir: &std::path::Path) -> String {
    let output = run_vit_command(dir, &["status"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    String::from_utf8(output).expect("status output is not UTF-8")
}

#[rstest]
fn a_fresh_repository_has_empty_sections(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    assert_eq!(
        status_output(dir.path()),
        "=== Branches ===\n\
         *master\n\
         \n\
         === Staged Files ===\n\
         \n\
         === Removed Files ===\n\
         \n\
         === Modifications Not Staged For Commit ===\n\
         \n\
         === Untracked Files ===\n\
         \n"
    );
}

#[rstest]
fn untracked_files_are_listed_in_name_order(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    write_file(dir.path(), "b.txt", "b\n");
    write_file(dir.path(), "a.txt", "a\n");

    let output = status_output(dir.path());
    assert!(output.ends_with("=== Untracked Files ===\na.txt\nb.txt\n\n"));
}

#[rstest]
fn staged_files_are_not_untracked(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    write_file(dir.path(), "a.txt", "a\n");
    run_vit_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();

    let output = status_output(dir.path());
    assert!(output.contains("=== Staged Files ===\na.txt\n\n"));
    assert!(output.ends_with("=== Untracked Files ===\n\n"));
}

#[rstest]
fn an_unstaged_edit_is_reported_as_modified(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    write_file(dir.path(), "a.txt", "committed\n");
    run_vit_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    vit_commit(dir.path(), "track a").assert().success();

    write_file(dir.path(), "a.txt", "edited afterwards\n");

    let output = status_output(dir.path());
    assert!(output.contains(
        "=== Modifications Not Staged For Commit ===\na.txt(modified)\n\n"
    ));
}

#[rstest]
fn a_tracked_file_deleted_from_disk_is_reported_as_deleted(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    write_file(dir.path(), "a.txt", "committed\n");
    run_vit_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    vit_commit(dir.path(), "track a").assert().success();

    remove_file(dir.path(), "a.txt");

    let output = status_output(dir.path());
    assert!(output.contains(
        "=== Modifications Not Staged For Commit ===\na.txt(deleted)\n\n"
    ));
}

#[rstest]
fn a_staged_file_edited_on_disk_is_reported_as_modified(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    write_file(dir.path(), "a.txt", "staged\n");
    run_vit_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();

    write_file(dir.path(), "a.txt", "edited after staging\n");

    let output = status_output(dir.path());
    assert!(output.contains(
        "=== Modifications Not Staged For Commit ===\na.txt(modified)\n\n"
    ));
}

#[rstest]
fn a_file_marked_for_removal_is_listed_in_removed_files(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    write_file(dir.path(), "a.txt", "committed\n");
    run_vit_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    vit_commit(dir.path(), "track a").assert().success();

    run_vit_command(dir.path(), &["rm", "a.txt"])
        .assert()
        .success();

    let output = status_output(dir.path());
    assert!(output.contains("=== Removed Files ===\na.txt\n\n"));
    // marked for removal, so its absence from disk is not a modification
    assert!(output.contains("=== Modifications Not Staged For Commit ===\n\n"));
}

#[rstest]
fn status_is_read_only(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    write_file(dir.path(), "a.txt", "a\n");
    run_vit_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();

    let before = status_output(dir.path());
    let after = status_output(dir.path());
    assert_eq!(before, after);

    run_vit_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Staged Files ===\na.txt\n"));
}
