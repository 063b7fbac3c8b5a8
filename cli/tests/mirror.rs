//! # deeplink CLI Mirror Integration Tests
//!
//! File: cli/tests/mirror.rs
//!
//! ## Overview
//!
//! End-to-end tests running the `deeplink` binary against temporary trees:
//! link layout, self-exclusion, idempotent re-runs, dry runs, pattern
//! options and the exit codes of each failure kind.
//!
#![cfg(unix)]

mod common;
use common::*;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_mirror_sample_tree() {
    let (_dir, base) = sample_tree();
    let dest = base.join("mirror");

    deeplink_cmd()
        .arg("-s")
        .arg(base.join("in"))
        .arg(&dest)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 directories created, 2 links created"));

    assert_eq!(link_target(&dest.join("file1")), base.join("in/file1"));
    assert!(dest.join("subdir").is_dir());
    assert!(!dest.join("subdir").is_symlink());
    assert_eq!(link_target(&dest.join("subdir/file2")), base.join("in/subdir/file2"));
}

#[test]
fn test_source_defaults_to_current_directory() {
    let (_dir, base) = sample_tree();

    deeplink_cmd()
        .current_dir(base.join("in"))
        .arg("mirror")
        .assert()
        .success();

    let dest = base.join("in/mirror");
    assert_eq!(link_target(&dest.join("file1")), base.join("in/file1"));
    assert!(
        fs::symlink_metadata(dest.join("mirror")).is_err(),
        "destination must not be mirrored into itself"
    );
}

#[test]
fn test_nested_destination_has_no_self_copy() {
    let (_dir, base) = sample_tree();
    fs::create_dir_all(base.join("in/a")).unwrap();
    let dest = base.join("in/a/b");

    deeplink_cmd()
        .arg("-s")
        .arg(base.join("in"))
        .arg(&dest)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 skipped"));

    assert!(dest.join("a").is_dir());
    assert!(!dest.join("a/b").exists());
}

#[test]
fn test_rerun_reports_unchanged() {
    let (_dir, base) = sample_tree();
    let dest = base.join("mirror");
    for _ in 0..2 {
        deeplink_cmd()
            .arg("-s")
            .arg(base.join("in"))
            .arg(&dest)
            .assert()
            .success();
    }
    deeplink_cmd()
        .arg("-s")
        .arg(base.join("in"))
        .arg(&dest)
        .assert()
        .success()
        .stdout(predicate::str::contains("0 links created, 2 unchanged"));
}

#[test]
fn test_destination_is_file_exits_with_invalid_arguments() {
    let (_dir, base) = sample_tree();
    let dest = base.join("taken");
    fs::write(&dest, "occupied").unwrap();

    deeplink_cmd()
        .arg("-s")
        .arg(base.join("in"))
        .arg(&dest)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid destination"));
    assert_eq!(fs::read_to_string(&dest).unwrap(), "occupied");
}

#[test]
fn test_missing_source_exits_with_invalid_arguments() {
    let (_dir, base) = sample_tree();
    deeplink_cmd()
        .arg("-s")
        .arg(base.join("nope"))
        .arg(base.join("mirror"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid source"));
    assert!(!base.join("mirror").exists());
}

#[test]
fn test_destination_with_missing_parent_exits_with_invalid_arguments() {
    let (_dir, base) = sample_tree();
    deeplink_cmd()
        .arg("-s")
        .arg(base.join("in"))
        .arg(base.join("in/new/mirror"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("parent directory does not exist"));
    assert!(!base.join("in/new").exists());
}

#[test]
fn test_conflict_exits_with_filesystem_error() {
    let (_dir, base) = sample_tree();
    let dest = base.join("mirror");
    fs::create_dir(&dest).unwrap();
    fs::write(dest.join("subdir"), "in the way").unwrap();

    deeplink_cmd()
        .arg("-s")
        .arg(base.join("in"))
        .arg(&dest)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Destination conflict"));
    assert!(!dest.join("subdir/file2").exists());
}

#[test]
fn test_keep_going_finishes_then_fails() {
    let (_dir, base) = sample_tree();
    let dest = base.join("mirror");
    fs::create_dir(&dest).unwrap();
    fs::write(dest.join("file1"), "local").unwrap();
    fs::write(base.join("in/zzz"), "z").unwrap();

    deeplink_cmd()
        .arg("-s")
        .arg(base.join("in"))
        .arg(&dest)
        .arg("--keep-going")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("1 failed"))
        .stderr(predicate::str::contains("Mirror incomplete: 1 entries failed"));
    assert!(dest.join("zzz").is_symlink());
    assert!(dest.join("subdir/file2").is_symlink());
}

#[test]
fn test_on_conflict_overwrite() {
    let (_dir, base) = sample_tree();
    let dest = base.join("mirror");
    fs::create_dir(&dest).unwrap();
    fs::write(dest.join("file1"), "stale").unwrap();

    deeplink_cmd()
        .arg("-s")
        .arg(base.join("in"))
        .arg(&dest)
        .args(["--on-conflict", "overwrite"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 replaced"));
    assert_eq!(link_target(&dest.join("file1")), base.join("in/file1"));
}

#[test]
fn test_dry_run_prints_plan_only() {
    let (_dir, base) = sample_tree();
    let dest = base.join("mirror");

    deeplink_cmd()
        .arg("-n")
        .arg("-s")
        .arg(base.join("in"))
        .arg(&dest)
        .assert()
        .success()
        .stdout(
            predicate::str::contains(format!("mkdir {}", dest.display()))
                .and(predicate::str::contains(format!(
                    "link {} {}",
                    base.join("in/file1").display(),
                    dest.join("file1").display()
                )))
                .and(predicate::str::contains("Would mirror")),
        );
    assert!(!dest.exists());
}

#[test]
fn test_ignore_and_copy_list_files() {
    let (_dir, base) = sample_tree();
    fs::create_dir(base.join("in/dir-a")).unwrap();
    fs::write(base.join("in/dir-a/file-a"), "a").unwrap();
    fs::write(base.join("in/dir-a/ignore-file-a"), "i").unwrap();
    let ignore_list = base.join("ignore-list");
    fs::write(&ignore_list, "#This is a comment\n.*ignore-file-a.*\n\n").unwrap();
    let copy_list = base.join("copy-list");
    fs::write(&copy_list, "# copies\nsubdir/file2$\n").unwrap();
    let dest = base.join("out");

    deeplink_cmd()
        .arg("-s")
        .arg(base.join("in"))
        .arg(&dest)
        .arg("-I")
        .arg(&ignore_list)
        .arg("-C")
        .arg(&copy_list)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 files copied"));

    assert!(dest.join("dir-a/file-a").is_symlink());
    assert!(fs::symlink_metadata(dest.join("dir-a/ignore-file-a")).is_err());
    assert!(!dest.join("subdir/file2").is_symlink());
    assert_eq!(fs::read_to_string(dest.join("subdir/file2")).unwrap(), "two");
}

#[test]
fn test_invalid_ignore_pattern_exits_with_invalid_arguments() {
    let (_dir, base) = sample_tree();
    deeplink_cmd()
        .arg("-s")
        .arg(base.join("in"))
        .arg(base.join("out"))
        .args(["-i", "(oops"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid pattern '(oops'"));
    assert!(!base.join("out").exists());
}

#[test]
fn test_relative_links_survive_moving_both_trees() {
    let (_dir, base) = sample_tree();
    let dest = base.join("mirror");

    deeplink_cmd()
        .arg("-s")
        .arg(base.join("in"))
        .arg(&dest)
        .arg("--relative")
        .assert()
        .success();

    let moved = base.join("moved");
    fs::create_dir(&moved).unwrap();
    fs::rename(base.join("in"), moved.join("in")).unwrap();
    fs::rename(&dest, moved.join("mirror")).unwrap();
    assert_eq!(
        fs::read_to_string(moved.join("mirror/subdir/file2")).unwrap(),
        "two"
    );
}
