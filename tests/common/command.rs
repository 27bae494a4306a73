use crate::common::COMMIT_DATE;
use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// A repository whose master branch holds one commit ("first") tracking
/// `a.txt` with content "one\n"
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_bitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("a.txt"),
        "one\n".to_string(),
    ));

    run_bitlet_command(repository_dir.path(), &["add", "a.txt"])
        .assert()
        .success();

    bitlet_commit(repository_dir.path(), "first")
        .assert()
        .success();

    repository_dir
}

pub fn run_bitlet_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("bitlet").expect("Failed to find bitlet binary");
    cmd.envs(vec![("NO_PAGER", "1"), ("NO_COLOR", "1")]);
    cmd.env_remove("RUST_LOG");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn bitlet_commit(dir: &Path, message: &str) -> Command {
    let mut cmd = run_bitlet_command(dir, &["commit", message]);
    cmd.env("BITLET_COMMIT_DATE", COMMIT_DATE);
    cmd
}

/// Write `content` to `file_name`, stage it and commit it
pub fn commit_file(dir: &Path, file_name: &str, content: &str, message: &str) {
    write_file(FileSpec::new(dir.join(file_name), content.to_string()));

    run_bitlet_command(dir, &["add", file_name])
        .assert()
        .success();

    bitlet_commit(dir, message).assert().success();
}

/// Tip of `branch_name`, read straight from the branch file
pub fn branch_commit_id(dir: &Path, branch_name: &str) -> String {
    let ref_path = dir
        .join(".bitlet")
        .join("refs")
        .join("heads")
        .join(branch_name);

    std::fs::read_to_string(&ref_path)
        .unwrap_or_else(|e| panic!("Failed to read ref {:?}: {}", ref_path, e))
        .trim()
        .to_string()
}

/// Branch HEAD points at
pub fn current_branch(dir: &Path) -> String {
    let head = std::fs::read_to_string(dir.join(".bitlet").join("HEAD"))
        .expect("Failed to read HEAD");

    head.trim()
        .strip_prefix("ref: refs/heads/")
        .expect("HEAD is not a branch reference")
        .to_string()
}

pub fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success();
    String::from_utf8(output.get_output().stdout.clone()).expect("stdout is not UTF-8")
}
