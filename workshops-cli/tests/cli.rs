use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn workshops_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("workshops"));
    cmd.env("HOME", home)
        .env("USERPROFILE", home)
        .env_remove("GOOGLE_ACCESS_TOKEN")
        .env_remove("GITHUB_TOKEN")
        .current_dir(home);
    cmd
}

#[test]
fn help_lists_flags() {
    let home = TempDir::new().expect("home");
    workshops_cmd(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("--skip-existing"))
        .stdout(contains("--config"));
}

#[test]
fn missing_sheets_token_is_a_startup_failure() {
    let home = TempDir::new().expect("home");
    workshops_cmd(home.path())
        .assert()
        .failure()
        .stderr(contains("no Google Sheets token"));
}

#[test]
fn unreadable_config_fails_before_any_request() {
    let home = TempDir::new().expect("home");
    let config = home.path().join("config.yaml");
    fs::write(&config, "organization: [not, a, string\n").expect("write config");

    workshops_cmd(home.path())
        .env("GOOGLE_ACCESS_TOKEN", "unused")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(contains("failed to load config"));
}

#[test]
fn rejects_unknown_flags() {
    let home = TempDir::new().expect("home");
    workshops_cmd(home.path())
        .arg("--dry-run")
        .assert()
        .failure();
}
