use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

/// Nothing listens here, so any request that does go out fails right away
const UNREACHABLE_API: &str = "http://127.0.0.1:1";

fn bootstrap() -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.env_remove("RUST_LOG").args(["--api-url", UNREACHABLE_API]);
    cmd
}

#[test]
fn missing_token() {
    bootstrap()
        .env_remove("GITHUB_TOKEN")
        .args(["--name", "demo"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("GITHUB_TOKEN not in environment"))
        .stdout(predicate::str::contains("Creating repository").not());
}

#[test]
fn token_is_checked_before_name() {
    bootstrap()
        .env_remove("GITHUB_TOKEN")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("GITHUB_TOKEN not in environment"));
}

#[test]
fn missing_name() {
    bootstrap()
        .env("GITHUB_TOKEN", "ghp_test")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Repository name required"))
        .stdout(predicate::str::contains("Creating repository").not());
}

#[test]
fn blank_name() {
    bootstrap()
        .env("GITHUB_TOKEN", "ghp_test")
        .args(["--name", "  "])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid repository name"))
        .stdout(predicate::str::contains("Creating repository").not());
}

#[test]
fn invalid_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "[protection]\ndismissal-teams = \"admin-user\"\n").unwrap();

    bootstrap()
        .env("GITHUB_TOKEN", "ghp_test")
        .args(["--name", "demo"])
        .arg("--config")
        .arg(&config)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Could not parse config file"))
        .stdout(predicate::str::contains("Creating repository").not());
}

#[test]
fn best_effort_exits_successfully() {
    bootstrap()
        .env("GITHUB_TOKEN", "ghp_test")
        .args(["--name", "demo", "--organization", "acme"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Creating repository"))
        .stderr(predicate::str::contains("Could not create repository"))
        .stderr(predicate::str::contains("Could not add .gitignore"))
        .stdout(predicate::str::contains("Success!").not());
}

#[test]
fn fail_fast_stops_and_fails() {
    bootstrap()
        .env("GITHUB_TOKEN", "ghp_test")
        .args(["--name", "demo", "--organization", "acme", "--fail-fast"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Could not create repository").count(1))
        .stdout(predicate::str::contains("Updating default branch protection").not());
}
