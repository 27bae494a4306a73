use crate::common::command::{repository_dir, run_bitlet_command, stdout_of};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn status_of_fresh_repository(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_bitlet_command(dir, &["init"]).assert().success();

    let stdout = stdout_of(&mut run_bitlet_command(dir, &["status"]));

    assert_eq!(
        stdout,
        "=== Branches ===\n*master\n\n\
        === Staged Files ===\n\n\
        === Removed Files ===\n\n\
        === Modifications Not Staged For Commit ===\n\n\
        === Untracked Files ===\n\n"
    );
}
