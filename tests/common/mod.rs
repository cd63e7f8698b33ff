use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::fixture::ChildPath;
use assert_fs::prelude::*;

/// Content root inside the test temp dir; the CLI creates it on first use.
pub fn media_root(temp: &TempDir) -> ChildPath {
    temp.child("media")
}

/// Write a throwaway source file. Classification only looks at the name, so
/// the bytes can be anything.
pub fn write_source(temp: &TempDir, name: &str, bytes: &[u8]) -> ChildPath {
    let file = temp.child(name);
    file.write_binary(bytes).unwrap();
    file
}

/// Import one file non-interactively.
pub fn import(root: &ChildPath, source: &ChildPath, title: &str, tags: &str) {
    let mut cmd = Command::cargo_bin("mediatag").unwrap();
    cmd.arg("import")
        .arg(source.path())
        .arg("--root")
        .arg(root.path())
        .arg("--title")
        .arg(title)
        .arg("--tags")
        .arg(tags)
        .assert()
        .success();
}
