//! CLI integration tests.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `gdps` running in an empty directory against its own database file.
fn gdps(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("gdps");
    cmd.current_dir(dir.path())
        .env("GDPS_DATABASE_PATH", dir.path().join("db").join("gdps.db"))
        .env_remove("TELEGRAM_BOT_TOKEN")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    gdps(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("install"))
        .stdout(predicate::str::contains("dispatch"))
        .stdout(predicate::str::contains("records"));
}

#[test]
fn install_creates_database() {
    let dir = TempDir::new().unwrap();
    gdps(&dir)
        .arg("install")
        .assert()
        .success()
        .stdout(predicate::str::contains("Schema installed"));
    assert!(dir.path().join("db").join("gdps.db").exists());

    gdps(&dir)
        .arg("install")
        .assert()
        .success()
        .stdout(predicate::str::contains("already up to date"));
}

#[test]
fn dispatch_records_citation() {
    let dir = TempDir::new().unwrap();
    gdps(&dir).arg("install").assert().success();

    gdps(&dir)
        .args(["dispatch", "citation", "Alice", "spam"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Citation #1 recorded for Alice"));

    gdps(&dir)
        .args(["dispatch", "/offender", "Alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 citation"))
        .stdout(predicate::str::contains("spam"));
}

#[test]
fn dispatch_unknown_command_warns() {
    let dir = TempDir::new().unwrap();
    gdps(&dir).arg("install").assert().success();

    gdps(&dir)
        .args(["dispatch", "nonexistent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("unknown command"));
}

#[test]
fn records_lists_rows_as_json() {
    let dir = TempDir::new().unwrap();
    gdps(&dir).arg("install").assert().success();
    gdps(&dir)
        .args(["dispatch", "offender", "add", "Bob", "Blue"])
        .assert()
        .success();

    gdps(&dir)
        .args(["--json", "records", "offenders"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\":\"Bob\""))
        .stdout(predicate::str::contains("\"alliance\":\"Blue\""));

    gdps(&dir)
        .args([
            "--json", "records", "offenders", "--column", "name", "--value", "Nobody",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));
}

#[test]
fn records_rejects_unknown_table() {
    let dir = TempDir::new().unwrap();
    gdps(&dir).arg("install").assert().success();

    gdps(&dir)
        .args(["records", "users"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown table"));
}

#[test]
fn check_reports_missing_token() {
    let dir = TempDir::new().unwrap();
    gdps(&dir)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn invalid_config_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[bot]\nprefix = \"\"\n").unwrap();

    gdps(&dir)
        .arg("check")
        .arg("--config")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("bot.prefix"));
}

#[test]
fn missing_config_file_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    gdps(&dir)
        .args(["install", "--config", "missing.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config file"));
}
