use crate::common::command::{branch_commit_id, repository_dir, run_bitlet_command};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn root_commit_is_identical_everywhere(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let other_dir = TempDir::new()?;

    run_bitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    run_bitlet_command(other_dir.path(), &["init"])
        .assert()
        .success();

    assert_eq!(
        branch_commit_id(repository_dir.path(), "master"),
        branch_commit_id(other_dir.path(), "master")
    );

    Ok(())
}
