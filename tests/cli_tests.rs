//! CLI argument handling, no network required.

use assert_cmd::Command;
use predicates::prelude::*;

fn finboard() -> Command {
    let mut cmd = Command::cargo_bin("finboard").unwrap();
    // Keep the binary away from any real credential file or API
    cmd.env("XDG_DATA_HOME", std::env::temp_dir().join("finboard-cli-tests"));
    cmd.env("FINBOARD_API_URL", "http://127.0.0.1:9/api/v1");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    finboard()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("wallets"))
        .stdout(predicate::str::contains("advice"))
        .stdout(predicate::str::contains("invest"));
}

#[test]
fn test_no_subcommand_is_an_error() {
    finboard()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_risk_out_of_range_rejected() {
    finboard()
        .args(["advice", "--risk", "150"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("150"));
}

#[test]
fn test_invest_requires_amount_and_risk() {
    finboard()
        .arg("invest")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--amount").or(predicate::str::contains("--risk")));
}

#[test]
fn test_version_flag() {
    finboard()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
