use assert_cmd::cargo::{self};
use predicates::str::contains;

#[test]
fn prints_help() {
    let mut cmd = cargo::cargo_bin_cmd!("maskfield");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(contains("maskfield"))
        .stdout(contains("format"))
        .stdout(contains("form"));
}

#[test]
fn missing_subcommand_fails() {
    let mut cmd = cargo::cargo_bin_cmd!("maskfield");
    cmd.assert().failure();
}
