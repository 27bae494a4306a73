use crate::common::LOG_DATE;
use crate::common::command::{
    bitlet_commit, branch_commit_id, commit_file, init_repository_dir, run_bitlet_command,
    stdout_of,
};
use crate::common::file::{FileSpec, delete_file, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn commit_prints_branch_and_short_id(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("b.txt"), "two\n".to_string()));
    run_bitlet_command(dir, &["add", "b.txt"]).assert().success();

    let stdout = stdout_of(&mut bitlet_commit(dir, "second"));

    let commit_id = branch_commit_id(dir, "master");
    assert_eq!(stdout, format!("[master {}] second\n", &commit_id[..7]));
}

#[rstest]
fn commit_clears_the_staging_area(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    let status = stdout_of(&mut run_bitlet_command(dir, &["status"]));

    assert!(status.contains("=== Staged Files ===\n\n"), "{status}");
    assert!(
        !dir.join(".bitlet").join("staging").read_dir().unwrap().any(|_| true),
        "staged blobs should be purged after a commit"
    );
}

#[rstest]
fn committed_files_can_be_restored(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    commit_file(dir, "b.txt", "two\n", "second");

    delete_file(&dir.join("a.txt"));
    delete_file(&dir.join("b.txt"));
    run_bitlet_command(dir, &["checkout", "--", "a.txt"])
        .assert()
        .success();
    run_bitlet_command(dir, &["checkout", "--", "b.txt"])
        .assert()
        .success();

    assert_eq!(read_file(&dir.join("a.txt")), "one\n");
    assert_eq!(read_file(&dir.join("b.txt")), "two\n");
}

#[rstest]
fn commit_date_is_taken_from_the_environment(init_repository_dir: TempDir) {
    run_bitlet_command(init_repository_dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Date: {LOG_DATE}\nfirst\n")));
}

#[rstest]
fn removals_drop_files_from_the_next_commit(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_bitlet_command(dir, &["rm", "a.txt"]).assert().success();
    bitlet_commit(dir, "drop a").assert().success();

    run_bitlet_command(dir, &["checkout", "--", "a.txt"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("File does not exist in that commit."));
}
