//! Integration tests for `module-console config`.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

fn config_cmd(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("module-console");
    cmd.current_dir(dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join("xdg"))
        .env_remove("CONSOLE_BASE_URL")
        .env_remove("MODULE_CONSOLE_TIMEOUT_SECS")
        .env_remove("MODULE_CONSOLE_PRESELECTED")
        .env_remove("MODULE_CONSOLE_LOG_LEVEL")
        .arg("config");
    cmd
}

#[test]
fn init_creates_local_file_with_defaults() {
    let temp = TempDir::new().unwrap();

    config_cmd(&temp)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    let raw = std::fs::read_to_string(temp.path().join("module-console.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["api"]["base_url"], "http://localhost:5000");
    assert_eq!(json["api"]["timeout_secs"], 10);
    assert_eq!(json["modules"]["fallback_sequence"], 9999);
}

#[test]
fn init_refuses_to_overwrite_without_force() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("module-console.json"), "{}").unwrap();

    config_cmd(&temp)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    config_cmd(&temp).args(["init", "--force"]).assert().success();
}

#[test]
fn show_merges_local_file_over_defaults() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("module-console.json"),
        r#"{"api": {"base_url": "https://console.example"}, "modules": {"sequences": {"9": 40}}}"#,
    )
    .unwrap();

    let output = config_cmd(&temp).args(["show", "--json"]).output().unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["api"]["base_url"], "https://console.example");
    assert_eq!(json["api"]["timeout_secs"], 10);
    assert_eq!(json["modules"]["sequences"]["9"], 40);
}

#[test]
fn show_reads_the_directory_given_by_path() {
    let temp = TempDir::new().unwrap();
    let other = TempDir::new().unwrap();
    std::fs::write(
        other.path().join("module-console.json"),
        r#"{"logging": {"level": "debug"}}"#,
    )
    .unwrap();

    config_cmd(&temp)
        .args(["show", "--path", other.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"level\": \"debug\""))
        .stdout(predicate::str::contains("found"));
}

#[test]
fn validate_reports_warnings() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("module-console.json"),
        r#"{"api": {"timeout_secs": 0}}"#,
    )
    .unwrap();

    config_cmd(&temp)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("api.timeout_secs"))
        .stdout(predicate::str::contains("1 warning(s)"));
}

#[test]
fn validate_accepts_defaults() {
    let temp = TempDir::new().unwrap();

    config_cmd(&temp)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings are valid"));
}

#[test]
fn invalid_json_is_an_error() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("module-console.json"), "{not json").unwrap();

    config_cmd(&temp)
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid JSON"));
}
