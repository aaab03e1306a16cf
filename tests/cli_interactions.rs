//! CLI options interaction tests
//!
//! These tests only exercise paths that finish before any request is sent,
//! so they run without network access.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

/// Helper function to create a test command
fn create_test_cmd() -> Command {
    let mut cmd = Command::cargo_bin("nst").unwrap();
    cmd.env_remove("TIMEOUT_SECONDS").env_remove("ENABLE_COLOR");
    cmd
}

#[test]
fn test_version_flag() {
    create_test_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "network-speed-tester version {}\n",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn test_version_wins_over_other_flags() {
    create_test_cmd()
        .args(["--version", "--download", "--lite"])
        .assert()
        .success()
        .stdout(predicate::str::contains("version"))
        .stdout(predicate::str::contains("Cloudflare Speed Test").not());
}

#[test]
fn test_help_lists_options() {
    let output = create_test_cmd().arg("--help").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in [
        "--download",
        "--upload",
        "--version",
        "--lite",
        "--lite-download",
        "--lite-upload",
        "--timeout",
        "--color",
        "--no-color",
        "--verbose",
        "--debug",
    ] {
        assert!(stdout.contains(flag), "help is missing {}", flag);
    }
}

#[test]
fn test_conflicting_color_flags() {
    create_test_cmd()
        .args(["--color", "--no-color"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Cannot specify both --color and --no-color"));
}

#[test]
fn test_invalid_timeout_values() {
    for value in ["0", "301", "abc", "+10", "0x10"] {
        create_test_cmd()
            .args(["--timeout", value])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid duration").or(predicate::str::contains("Duration")));
    }
}

#[test]
fn test_invalid_timeout_environment() {
    create_test_cmd()
        .env("TIMEOUT_SECONDS", "soon")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("TIMEOUT_SECONDS"));
}

#[test]
fn test_unknown_option() {
    create_test_cmd()
        .arg("--count")
        .arg("5")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected argument"));
}
