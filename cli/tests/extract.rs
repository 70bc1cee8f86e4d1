//! # txtarc CLI Extract Integration Tests
//!
//! File: cli/tests/extract.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/txtarc
//!
//! ## Overview
//!
//! Integration tests for `txtarc -x`, with emphasis on where files land:
//! under the target directory, and never above it unless `-P` is given.
//!

mod common;
use common::*;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_extract_into_directory() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out");
    fs::create_dir(&out).unwrap();
    fs::write(
        dir.path().join("a.txtar"),
        "comment\n-- a.txt --\nhi\n-- deep/er/b.txt --\nbye\n",
    )
    .unwrap();

    txtarc_cmd()
        .current_dir(dir.path())
        .args(["-xf", "a.txtar", "-C", "out"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(fs::read_to_string(out.join("a.txt")).unwrap(), "hi\n");
    assert_eq!(fs::read_to_string(out.join("deep/er/b.txt")).unwrap(), "bye\n");
}

#[test]
fn test_extract_verbose_prints_names() {
    let dir = tempdir().unwrap();

    txtarc_cmd()
        .current_dir(dir.path())
        .arg("-xv")
        .write_stdin("-- x --\nx\n-- y/z --\nz\n")
        .assert()
        .success()
        .stdout("-No Comment-\n\nx\ny/z\n");
    assert!(dir.path().join("y/z").is_file());
}

#[test]
fn test_extract_cannot_escape() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out");
    fs::create_dir(&out).unwrap();

    txtarc_cmd()
        .args(["-x", "-C"])
        .arg(&out)
        .write_stdin("-- ../../escaped.txt --\nno\n-- /abs.txt --\nabs\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Cleaned"));

    assert_eq!(fs::read_to_string(out.join("escaped.txt")).unwrap(), "no\n");
    assert_eq!(fs::read_to_string(out.join("abs.txt")).unwrap(), "abs\n");
    assert!(!dir.path().join("escaped.txt").exists());
}

#[test]
fn test_extract_unsafe_paths_are_trusted() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out");
    fs::create_dir(&out).unwrap();

    txtarc_cmd()
        .args(["-xP", "-C"])
        .arg(&out)
        .write_stdin("-- ../escaped.txt --\nyes\n")
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(dir.path().join("escaped.txt")).unwrap(),
        "yes\n"
    );
}

#[test]
fn test_extract_selected_entries_only() {
    let dir = tempdir().unwrap();

    txtarc_cmd()
        .current_dir(dir.path())
        .args(["-x", "*.md", "--exclude-regex", "^skip"])
        .write_stdin("-- keep.md --\nk\n-- skip.md --\ns\n-- other.txt --\no\n")
        .assert()
        .success();

    assert!(dir.path().join("keep.md").is_file());
    assert!(!dir.path().join("skip.md").exists());
    assert!(!dir.path().join("other.txt").exists());
}

#[test]
fn test_extract_unwritable_entry_continues() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("blocker"), "a plain file").unwrap();

    txtarc_cmd()
        .current_dir(dir.path())
        .arg("-x")
        .write_stdin("-- blocker/inner --\nx\n-- fine --\ny\n")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error writing blocker/inner"));

    assert_eq!(fs::read_to_string(dir.path().join("fine")).unwrap(), "y\n");
}

#[test]
fn test_create_then_extract_round_trip() {
    let src = tempdir().unwrap();
    let dst = tempdir().unwrap();
    write_tree(
        src.path(),
        &[("t/a.txt", "alpha\n"), ("t/b/c.txt", "gamma\n"), ("t/b/d.txt", "")],
    );
    let archive = dst.path().join("t.txtar.gz");

    txtarc_cmd()
        .current_dir(src.path())
        .args(["-czf"])
        .arg(&archive)
        .arg("t")
        .assert()
        .success();

    txtarc_cmd()
        .args(["-xzf"])
        .arg(&archive)
        .arg("-C")
        .arg(dst.path())
        .assert()
        .success();

    for name in ["t/a.txt", "t/b/c.txt", "t/b/d.txt"] {
        assert_eq!(
            fs::read(src.path().join(name)).unwrap(),
            fs::read(dst.path().join(name)).unwrap(),
            "{name}"
        );
    }
}
