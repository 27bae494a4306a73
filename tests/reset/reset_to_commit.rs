use crate::common::command::{
    branch_commit_id, commit_file, init_repository_dir, run_bitlet_command, stdout_of,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn reset_moves_branch_and_files(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let first_id = branch_commit_id(dir, "master");
    commit_file(dir, "a.txt", "two\n", "second");
    commit_file(dir, "b.txt", "bee\n", "third");

    run_bitlet_command(dir, &["reset", &first_id[..10]])
        .assert()
        .success();

    assert_eq!(branch_commit_id(dir, "master"), first_id);
    assert_eq!(read_file(&dir.join("a.txt")), "one\n");
    assert!(!dir.join("b.txt").exists());

    let log = stdout_of(&mut run_bitlet_command(dir, &["log"]));
    assert!(log.starts_with(&format!("===\ncommit {first_id}\n")), "{log}");
}

#[rstest]
fn reset_clears_the_staging_area(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let first_id = branch_commit_id(dir, "master");
    write_file(FileSpec::new(dir.join("s.txt"), "staged\n".to_string()));
    run_bitlet_command(dir, &["add", "s.txt"]).assert().success();

    run_bitlet_command(dir, &["reset", &first_id])
        .assert()
        .success();

    let status = stdout_of(&mut run_bitlet_command(dir, &["status"]));
    assert!(status.contains("=== Staged Files ===\n\n"), "{status}");
}

#[rstest]
fn reset_to_unknown_commit_fails(init_repository_dir: TempDir) {
    run_bitlet_command(init_repository_dir.path(), &["reset", "deadbeef"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No commit with that id exists."));
}

#[rstest]
fn reset_with_untracked_file_in_the_way_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let first_id = branch_commit_id(dir, "master");
    run_bitlet_command(dir, &["rm", "a.txt"]).assert().success();
    commit_file(dir, "b.txt", "bee\n", "drop a");
    write_file(FileSpec::new(dir.join("a.txt"), "mine\n".to_string()));
    let head_before = branch_commit_id(dir, "master");

    run_bitlet_command(dir, &["reset", &first_id])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("There is an untracked file in the way"));

    assert_eq!(branch_commit_id(dir, "master"), head_before);
    assert_eq!(read_file(&dir.join("a.txt")), "mine\n");
}
