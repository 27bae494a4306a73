use crate::common::command::{init_repository_dir, repository_dir, run_bitlet_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn init_twice_fails(init_repository_dir: TempDir) {
    run_bitlet_command(init_repository_dir.path(), &["init"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "A Bitlet version-control system already exists in the current directory.",
        ));
}

#[rstest]
#[case(&["status"])]
#[case(&["log"])]
#[case(&["add", "a.txt"])]
#[case(&["branch", "b"])]
fn commands_outside_a_repository_fail(repository_dir: TempDir, #[case] args: &[&str]) {
    run_bitlet_command(repository_dir.path(), args)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "Not in an initialized Bitlet directory.",
        ));
}
