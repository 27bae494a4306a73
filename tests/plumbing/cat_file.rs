use crate::common::command::{branch_commit_id, init_repository_dir, run_bitlet_command, stdout_of};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn cat_file_prints_commit_objects(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let commit_id = branch_commit_id(dir, "master");

    let stdout = stdout_of(&mut run_bitlet_command(dir, &["cat-file", "-p", &commit_id]));

    assert!(stdout.contains("a.txt"), "{stdout}");
    assert!(stdout.contains("first"), "{stdout}");
}

#[rstest]
fn cat_file_of_unknown_object_fails(init_repository_dir: TempDir) {
    run_bitlet_command(init_repository_dir.path(), &["cat-file", "-p", "ffffffff"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No commit with that id exists."));
}

#[rstest]
#[case("aé")]
#[case("not-an-id")]
fn cat_file_of_a_non_hex_id_fails(init_repository_dir: TempDir, #[case] object_id: &str) {
    run_bitlet_command(init_repository_dir.path(), &["cat-file", "-p", object_id])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No commit with that id exists."));
}
