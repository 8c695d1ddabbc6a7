// Integration tests for the abus CLI surface.
//
// These tests use assert_cmd to invoke the binary and verify argument
// handling; dataset behaviour is covered in cli_atdd.rs.

#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to build a Command for the abus binary.
fn abus() -> Command {
    Command::cargo_bin("abus").expect("binary should exist")
}

#[test]
fn cli_version_flag() {
    abus()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("abus"));
}

#[test]
fn cli_help_flag() {
    abus()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("ABUS scoring dataset"));
}

#[test]
fn show_requires_model_name() {
    abus()
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn upsert_requires_payload() {
    abus()
        .arg("upsert")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn rank_rejects_limit_with_all() {
    // --limit and --all are mutually exclusive
    abus()
        .args(["rank", "--limit", "3", "--all"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn quiet_conflicts_with_verbose() {
    abus()
        .args(["-q", "-v", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn rank_rejects_sarif_format() {
    abus()
        .args(["rank", "--format", "sarif"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
