//! # deeplink CLI Main Integration Tests
//!
//! File: cli/tests/main_tests.rs
//!
//! ## Overview
//!
//! Verifies top-level behaviour of the `deeplink` binary: standard flags
//! and the exit code for usage errors.
//!

mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_help_lists_options_and_exit_codes() {
    deeplink_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--source")
                .and(predicate::str::contains("--on-conflict"))
                .and(predicate::str::contains("Exit codes:")),
        );
}

#[test]
fn test_version_flag() {
    deeplink_cmd()
        .arg("-V")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_destination_is_usage_error() {
    deeplink_cmd()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("DESTINATION"));
}

#[test]
fn test_unknown_conflict_policy_is_usage_error() {
    deeplink_cmd()
        .args(["out", "--on-conflict", "merge"])
        .assert()
        .code(1);
}

#[test]
fn test_relative_with_hard_links_is_usage_error() {
    deeplink_cmd()
        .args(["out", "--relative", "--hard-links"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot be used with"));
}
