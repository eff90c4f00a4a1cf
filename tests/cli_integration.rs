//! End-to-end tests for CLI commands using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn herald_cmd() -> Command {
    let mut cmd = Command::cargo_bin("herald").unwrap();
    cmd.env_remove("GEMINI_API_KEY")
        .env_remove("HERALD_BACKENDS")
        .env_remove("HERALD_BASE_URL");
    cmd
}

#[test]
fn test_version_output() {
    herald_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("herald"));
}

#[test]
fn test_help_shows_all_commands() {
    herald_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("compose"))
        .stdout(predicate::str::contains("templates"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_templates_table() {
    herald_cmd()
        .arg("templates")
        .assert()
        .success()
        .stdout(predicate::str::contains("Feature Announcement"))
        .stdout(predicate::str::contains("(fallback)"));
}

#[test]
fn test_templates_json() {
    let output = herald_cmd().args(["templates", "--json"]).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["templates"].as_array().unwrap().len(), 7);
}

#[test]
fn test_compose_without_key_uses_template() {
    let temp_dir = TempDir::new().unwrap();

    let output = herald_cmd()
        .current_dir(temp_dir.path())
        .args(["compose", "write a feedback request", "--user", "Ada"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["source"], "template");
    assert_eq!(value["templateName"], "Feedback Request");
    assert!(value.get("warning").is_none());
    assert!(value["body"].as_str().unwrap().contains("Ada"));
}

#[test]
fn test_compose_rejects_short_prompt() {
    let temp_dir = TempDir::new().unwrap();

    herald_cmd()
        .current_dir(temp_dir.path())
        .args(["compose", "  hi "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 5 characters"));
}

#[test]
fn test_config_init_creates_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("herald.toml");

    herald_cmd()
        .args(["config", "init", "-o"])
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration file created"));

    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("[generation]"));
}

#[test]
fn test_config_init_refuses_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("herald.toml");
    std::fs::write(&config_path, "existing").unwrap();

    herald_cmd()
        .args(["config", "init", "-o"])
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}
