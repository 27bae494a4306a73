use crate::common::command::{init_repository_dir, run_bitlet_command, stdout_of};
use crate::common::file::touch_file;
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn print_nothing_if_a_file_is_touched(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    touch_file(&dir.join("a.txt"));

    let stdout = stdout_of(&mut run_bitlet_command(dir, &["status"]));

    assert!(
        stdout.contains("=== Modifications Not Staged For Commit ===\n\n"),
        "{stdout}"
    );
    assert!(stdout.contains("=== Untracked Files ===\n\n"), "{stdout}");
}
