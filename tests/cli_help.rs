//! CLI help strings succeed.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn hostsman_help() {
    Command::cargo_bin("hostsman")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("toggle"));
}

#[test]
fn hostsman_backup_help() {
    Command::cargo_bin("hostsman")
        .unwrap()
        .args(["backup", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("restore"));
}

#[test]
fn hostsman_edit_help() {
    Command::cargo_bin("hostsman")
        .unwrap()
        .args(["edit", "--help"])
        .assert()
        .success();
}
