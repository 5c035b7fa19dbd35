//! CLI smoke tests for the offline commands.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Write a config + alias table pair into a temp dir and return the
/// config path.
fn fixture() -> (TempDir, String) {
    let dir = TempDir::new().unwrap();

    let alias_path = dir.path().join("aliases.toml");
    fs::write(
        &alias_path,
        r#"
        [nba."Los Angeles Lakers"]
        aliases = ["LAL", "LA Lakers"]

        [nba."Boston Celtics"]
        aliases = ["Celtics"]
        "#,
    )
    .unwrap();

    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        format!(
            r#"
            [resolver]
            alias_file = "{}"

            [logging]
            level = "error"
            "#,
            alias_path.display()
        ),
    )
    .unwrap();

    let config = config_path.display().to_string();
    (dir, config)
}

#[test]
fn help_lists_subcommands() {
    Command::cargo_bin("slatebook")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("slate"))
        .stdout(predicate::str::contains("resolve"))
        .stdout(predicate::str::contains("quota"));
}

#[test]
fn resolve_matches_through_alias_table() {
    let (_dir, config) = fixture();

    Command::cargo_bin("slatebook")
        .unwrap()
        .args(["--config", &config, "resolve", "--league", "nba", "LA Lakers"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Los Angeles Lakers"));
}

#[test]
fn resolve_reports_unresolved_names() {
    let (_dir, config) = fixture();

    Command::cargo_bin("slatebook")
        .unwrap()
        .args(["--config", &config, "resolve", "--league", "nba", "Zorblax United"])
        .assert()
        .success()
        .stdout(predicate::str::contains("unresolved"));
}

#[test]
fn unknown_league_is_rejected() {
    let (_dir, config) = fixture();

    Command::cargo_bin("slatebook")
        .unwrap()
        .args(["--config", &config, "resolve", "--league", "curling", "Lakers"])
        .assert()
        .failure();
}

#[test]
fn quota_without_api_key_fails() {
    let (_dir, config) = fixture();

    Command::cargo_bin("slatebook")
        .unwrap()
        .env_remove("ODDS_API_KEY")
        .args(["--config", &config, "quota"])
        .assert()
        .failure();
}
