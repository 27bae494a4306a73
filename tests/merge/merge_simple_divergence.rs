use crate::common::command::{
    bitlet_commit, branch_commit_id, commit_file, repository_dir, run_bitlet_command, stdout_of,
};
use crate::common::file::read_file;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

/// Test merging with simple divergent branches
///
/// History:
///
/// ```text
///       A (base)
///      / \
///     B   C
///     |   |
///   master  feature
/// ```
///
/// Expected: a merge commit combining B and C, each side's changes kept
#[rstest]
fn merge_simple_divergence(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_bitlet_command(dir, &["init"]).assert().success();
    commit_file(dir, "left.txt", "initial\n", "A");
    commit_file(dir, "right.txt", "initial\n", "A'");
    commit_file(dir, "gone.txt", "doomed\n", "A''");
    run_bitlet_command(dir, &["branch", "feature"])
        .assert()
        .success();

    commit_file(dir, "left.txt", "master change\n", "B");

    run_bitlet_command(dir, &["checkout", "feature"])
        .assert()
        .success();
    commit_file(dir, "right.txt", "feature change\n", "C");
    commit_file(dir, "new.txt", "feature only\n", "C'");
    run_bitlet_command(dir, &["rm", "gone.txt"]).assert().success();
    bitlet_commit(dir, "C''").assert().success();
    let feature_id = branch_commit_id(dir, "feature");

    run_bitlet_command(dir, &["checkout", "master"])
        .assert()
        .success();

    let stdout = stdout_of(&mut run_bitlet_command(dir, &["merge", "feature"]));

    assert_eq!(stdout, "");
    assert_eq!(read_file(&dir.join("left.txt")), "master change\n");
    assert_eq!(read_file(&dir.join("right.txt")), "feature change\n");
    assert_eq!(read_file(&dir.join("new.txt")), "feature only\n");
    assert!(!dir.join("gone.txt").exists());

    // the merge commit is the new split point
    let merge_base = stdout_of(&mut run_bitlet_command(dir, &["mergebase", "feature"]));
    assert_eq!(merge_base.trim(), feature_id);
    assert_eq!(
        stdout_of(&mut run_bitlet_command(dir, &["merge", "feature"])),
        "Given branch is an ancestor of the current branch.\n"
    );
}
