use crate::common::command::{current_branch, repository_dir, run_bitlet_command, stdout_of};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn init_repository_successfully(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let repository_path = repository_dir.path().canonicalize()?.join(".bitlet");

    let stdout = stdout_of(&mut run_bitlet_command(repository_dir.path(), &["init"]));

    assert_eq!(
        stdout,
        format!(
            "Initialized empty Bitlet repository in {}\n",
            repository_path.display()
        )
    );
    assert!(repository_path.join("objects").is_dir());
    assert!(repository_path.join("staging").is_dir());
    assert!(repository_path.join("refs").join("heads").join("master").is_file());
    assert_eq!(current_branch(repository_dir.path()), "master");

    Ok(())
}

#[rstest]
fn init_at_a_given_path(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let nested = repository_dir.path().join("project");

    run_bitlet_command(repository_dir.path(), &["init", "project"])
        .assert()
        .success();

    assert!(nested.join(".bitlet").join("HEAD").is_file());

    Ok(())
}
