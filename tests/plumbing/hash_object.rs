use crate::common::command::{init_repository_dir, run_bitlet_command, stdout_of};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn hash_object_matches_git_blob_ids(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("empty.txt"), String::new()));

    let stdout = stdout_of(&mut run_bitlet_command(dir, &["hash-object", "empty.txt"]));

    assert_eq!(stdout, "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391\n");
}

#[rstest]
fn hash_object_writes_only_when_asked(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("w.txt"), "write me\n".to_string()));
    let oid = stdout_of(&mut run_bitlet_command(dir, &["hash-object", "w.txt"]));
    let oid = oid.trim();
    let object_path = dir
        .join(".bitlet")
        .join("objects")
        .join(&oid[..2])
        .join(&oid[2..]);

    assert!(!object_path.exists());

    run_bitlet_command(dir, &["hash-object", "-w", "w.txt"])
        .assert()
        .success();

    assert!(object_path.is_file());
    assert_eq!(
        stdout_of(&mut run_bitlet_command(dir, &["cat-file", "-p", &oid[..8]])),
        "write me\n"
    );
}
