//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_serve() {
    let mut cmd = Command::cargo_bin("shareeats").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("serve"));
}

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("shareeats").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--in-memory"))
        .stdout(predicate::str::contains("--require-database"));
}

#[test]
fn test_unknown_command_fails() {
    let mut cmd = Command::cargo_bin("shareeats").unwrap();
    cmd.arg("bogus");

    cmd.assert().failure();
}

#[test]
fn test_invalid_port_fails() {
    let mut cmd = Command::cargo_bin("shareeats").unwrap();
    cmd.args(["serve", "--in-memory", "--port", "not-a-port"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
