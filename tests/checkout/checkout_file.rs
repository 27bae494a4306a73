use crate::common::command::{
    branch_commit_id, commit_file, init_repository_dir, run_bitlet_command, stdout_of,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn checkout_file_restores_committed_content(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("a.txt"), "scribbled\n".to_string()));

    run_bitlet_command(dir, &["checkout", "--", "a.txt"])
        .assert()
        .success();

    assert_eq!(read_file(&dir.join("a.txt")), "one\n");
}

#[rstest]
fn checkout_file_leaves_the_staging_area_alone(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("a.txt"), "staged\n".to_string()));
    run_bitlet_command(dir, &["add", "a.txt"]).assert().success();

    run_bitlet_command(dir, &["checkout", "--", "a.txt"])
        .assert()
        .success();

    let status = stdout_of(&mut run_bitlet_command(dir, &["status"]));
    assert!(status.contains("=== Staged Files ===\na.txt\n\n"), "{status}");
    assert!(
        status.contains("=== Modifications Not Staged For Commit ===\na.txt (modified)\n\n"),
        "{status}"
    );
}

#[rstest]
#[case(40)]
#[case(8)]
fn checkout_file_from_an_older_commit(init_repository_dir: TempDir, #[case] id_length: usize) {
    let dir = init_repository_dir.path();
    let first_id = branch_commit_id(dir, "master");
    commit_file(dir, "a.txt", "two\n", "second");

    run_bitlet_command(dir, &["checkout", &first_id[..id_length], "--", "a.txt"])
        .assert()
        .success();

    assert_eq!(read_file(&dir.join("a.txt")), "one\n");
}

#[rstest]
fn checkout_file_from_unknown_commit_fails(init_repository_dir: TempDir) {
    run_bitlet_command(
        init_repository_dir.path(),
        &["checkout", "0000000", "--", "a.txt"],
    )
    .assert()
    .failure()
    .code(1)
    .stderr(predicate::str::contains("No commit with that id exists."));
}

#[rstest]
fn checkout_file_not_in_commit_fails(init_repository_dir: TempDir) {
    run_bitlet_command(init_repository_dir.path(), &["checkout", "--", "zzz.txt"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("File does not exist in that commit."));
}

#[rstest]
fn checkout_without_operands_fails(init_repository_dir: TempDir) {
    run_bitlet_command(init_repository_dir.path(), &["checkout"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Incorrect operands."));
}
