//! # deeplink CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration test files (`main_tests.rs`,
//! `mirror.rs`). Each file in `cli/tests/` is compiled as a separate test
//! crate that runs the `deeplink` binary.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// # Get deeplink Command (`deeplink_cmd`)
///
/// Creates an `assert_cmd::Command` for the compiled `deeplink` binary.
///
/// ## Panics
/// Panics if the binary cannot be found via `Command::cargo_bin`.
pub fn deeplink_cmd() -> Command {
    Command::cargo_bin("deeplink").expect("Failed to find deeplink binary for testing")
}

/// # Sample Tree (`sample_tree`)
///
/// Creates `<tmp>/in` containing `file1` and `subdir/file2` and returns the
/// temp dir with its canonical path (macOS temp paths go through a symlink).
pub fn sample_tree() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let base = fs::canonicalize(dir.path()).expect("Failed to canonicalize temp dir");
    fs::create_dir_all(base.join("in/subdir")).unwrap();
    fs::write(base.join("in/file1"), "one").unwrap();
    fs::write(base.join("in/subdir/file2"), "two").unwrap();
    (dir, base)
}

/// Returns the content of the symbolic link at `path`, panicking if it is not one.
pub fn link_target(path: &Path) -> PathBuf {
    fs::read_link(path).unwrap_or_else(|e| panic!("{} is not a symlink: {}", path.display(), e))
}
