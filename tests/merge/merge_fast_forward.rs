use crate::common::command::{
    branch_commit_id, commit_file, init_repository_dir, run_bitlet_command, stdout_of,
};
use crate::common::count_log_entries;
use crate::common::file::read_file;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn merge_fast_forward_creates_no_commit(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_bitlet_command(dir, &["branch", "b"]).assert().success();
    run_bitlet_command(dir, &["checkout", "b"]).assert().success();
    commit_file(dir, "a.txt", "two\n", "second");
    commit_file(dir, "b.txt", "bee\n", "third");
    run_bitlet_command(dir, &["checkout", "master"])
        .assert()
        .success();
    let commits_before = count_log_entries(&stdout_of(&mut run_bitlet_command(
        dir,
        &["global-log"],
    )));

    let stdout = stdout_of(&mut run_bitlet_command(dir, &["merge", "b"]));

    assert_eq!(stdout, "Current branch fast-forwarded.\n");
    assert_eq!(branch_commit_id(dir, "master"), branch_commit_id(dir, "b"));
    assert_eq!(read_file(&dir.join("a.txt")), "two\n");
    assert_eq!(read_file(&dir.join("b.txt")), "bee\n");
    assert_eq!(
        count_log_entries(&stdout_of(&mut run_bitlet_command(dir, &["global-log"]))),
        commits_before
    );
}

#[rstest]
fn merge_ancestor_is_a_noop(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_bitlet_command(dir, &["branch", "b"]).assert().success();
    commit_file(dir, "a.txt", "two\n", "second");
    let master_id = branch_commit_id(dir, "master");

    let stdout = stdout_of(&mut run_bitlet_command(dir, &["merge", "b"]));

    assert_eq!(stdout, "Given branch is an ancestor of the current branch.\n");
    assert_eq!(branch_commit_id(dir, "master"), master_id);
}
