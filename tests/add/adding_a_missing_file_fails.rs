use crate::common::command::{init_repository_dir, run_bitlet_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn adding_a_missing_file_fails(init_repository_dir: TempDir) {
    run_bitlet_command(init_repository_dir.path(), &["add", "missing.txt"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("File does not exist."));
}

#[rstest]
fn nothing_is_staged_when_one_of_the_files_is_missing(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let index_path = dir.join(".bitlet").join("index");
    let index_before = std::fs::read(&index_path)?;
    write_file(FileSpec::new(dir.join("b.txt"), "two\n".to_string()));

    run_bitlet_command(dir, &["add", "b.txt", "missing.txt"])
        .assert()
        .failure();

    assert_eq!(std::fs::read(&index_path)?, index_before);

    Ok(())
}
