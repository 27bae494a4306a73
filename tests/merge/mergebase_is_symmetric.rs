use crate::common::command::{
    branch_commit_id, commit_file, init_repository_dir, run_bitlet_command, stdout_of,
};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn mergebase_is_symmetric(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let split_id = branch_commit_id(dir, "master");
    run_bitlet_command(dir, &["branch", "b"]).assert().success();
    commit_file(dir, "m.txt", "master\n", "on master");
    run_bitlet_command(dir, &["checkout", "b"]).assert().success();
    commit_file(dir, "n.txt", "b\n", "on b");

    let from_b = stdout_of(&mut run_bitlet_command(dir, &["mergebase", "master"]));
    run_bitlet_command(dir, &["checkout", "master"])
        .assert()
        .success();
    let from_master = stdout_of(&mut run_bitlet_command(dir, &["mergebase", "b"]));

    assert_eq!(from_b, format!("{split_id}\n"));
    assert_eq!(from_master, from_b);
}

#[rstest]
fn branch_from_root_commit_merges(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let root_id = stdout_of(&mut run_bitlet_command(dir, &["find", "initial commit"]));
    let first_id = branch_commit_id(dir, "master");
    run_bitlet_command(dir, &["reset", root_id.trim()])
        .assert()
        .success();
    run_bitlet_command(dir, &["branch", "from-root"])
        .assert()
        .success();
    run_bitlet_command(dir, &["reset", &first_id])
        .assert()
        .success();

    let merge_base = stdout_of(&mut run_bitlet_command(dir, &["mergebase", "from-root"]));

    assert_eq!(merge_base, root_id);
}
