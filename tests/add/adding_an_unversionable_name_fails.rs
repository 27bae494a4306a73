use crate::common::command::{init_repository_dir, run_bitlet_command, stdout_of};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn adding_a_name_with_a_newline_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let index_path = dir.join(".bitlet").join("index");
    let index_before = std::fs::read(&index_path)?;
    write_file(FileSpec::new(dir.join("x\ny"), "split\n".to_string()));

    run_bitlet_command(dir, &["add", "x\ny"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("File does not exist."));

    assert_eq!(std::fs::read(&index_path)?, index_before);
    run_bitlet_command(dir, &["commit", "nl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No changes added to the commit."));
    run_bitlet_command(dir, &["status"]).assert().success();

    Ok(())
}

#[rstest]
#[case(".bitlet/HEAD")]
#[case("nested/b.txt")]
#[case("../outside.txt")]
#[case("./a.txt")]
fn adding_a_path_outside_the_flat_workspace_fails(
    init_repository_dir: TempDir,
    #[case] file_name: &str,
) {
    let dir = init_repository_dir.path();
    std::fs::create_dir_all(dir.join("nested")).expect("Failed to create nested dir");
    write_file(FileSpec::new(dir.join("nested").join("b.txt"), "nested\n".to_string()));

    run_bitlet_command(dir, &["add", file_name])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("File does not exist."));

    let status = stdout_of(&mut run_bitlet_command(dir, &["status"]));
    assert!(status.contains("=== Staged Files ===\n\n"), "{status}");
}
