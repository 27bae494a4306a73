use crate::common::command::{
    commit_file, current_branch, init_repository_dir, run_bitlet_command, stdout_of,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn checkout_branch_switches_files(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_bitlet_command(dir, &["branch", "b"]).assert().success();
    commit_file(dir, "a.txt", "master version\n", "edit a");
    commit_file(dir, "m.txt", "only on master\n", "add m");

    run_bitlet_command(dir, &["checkout", "b"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());

    assert_eq!(current_branch(dir), "b");
    assert_eq!(read_file(&dir.join("a.txt")), "one\n");
    assert!(!dir.join("m.txt").exists());

    run_bitlet_command(dir, &["checkout", "master"])
        .assert()
        .success();

    assert_eq!(read_file(&dir.join("a.txt")), "master version\n");
    assert_eq!(read_file(&dir.join("m.txt")), "only on master\n");
}

#[rstest]
fn checkout_branch_clears_the_staging_area(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_bitlet_command(dir, &["branch", "b"]).assert().success();
    write_file(FileSpec::new(dir.join("s.txt"), "staged\n".to_string()));
    run_bitlet_command(dir, &["add", "s.txt"]).assert().success();

    run_bitlet_command(dir, &["checkout", "b"]).assert().success();

    let status = stdout_of(&mut run_bitlet_command(dir, &["status"]));
    assert!(status.contains("=== Staged Files ===\n\n"), "{status}");
}

#[rstest]
fn checkout_with_untracked_file_in_the_way_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_bitlet_command(dir, &["branch", "b"]).assert().success();
    run_bitlet_command(dir, &["checkout", "b"]).assert().success();
    commit_file(dir, "u.txt", "from b\n", "add u on b");
    run_bitlet_command(dir, &["checkout", "master"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.join("u.txt"), "mine\n".to_string()));

    run_bitlet_command(dir, &["checkout", "b"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "There is an untracked file in the way; delete it, or add and commit it first.",
        ));

    assert_eq!(current_branch(dir), "master");
    assert_eq!(read_file(&dir.join("u.txt")), "mine\n");
}

#[rstest]
fn untracked_files_out_of_the_way_survive_checkout(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_bitlet_command(dir, &["branch", "b"]).assert().success();
    write_file(FileSpec::new(dir.join("notes.txt"), "scratch\n".to_string()));

    run_bitlet_command(dir, &["checkout", "b"]).assert().success();

    assert_eq!(read_file(&dir.join("notes.txt")), "scratch\n");
}

#[rstest]
#[case("nope", "No such branch exists.")]
#[case("master", "No need to checkout the current branch.")]
fn invalid_branch_checkout_fails(
    init_repository_dir: TempDir,
    #[case] branch: &str,
    #[case] message: &str,
) {
    run_bitlet_command(init_repository_dir.path(), &["checkout", branch])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(message));
}
