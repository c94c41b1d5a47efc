//! End-to-end tests for `verbdeck status` commands.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

mod fixtures;
use fixtures::temp_small_catalog;

/// Path to the verbdeck binary
fn verbdeck_bin() -> String {
    std::env::var("CARGO_BIN_EXE_verbdeck").unwrap_or_else(|_| "target/release/verbdeck".to_string())
}

/// Runs verbdeck with an isolated config directory.
fn run_isolated(args: &[&str], config_dir: &Path) -> Output {
    Command::new(verbdeck_bin())
        .env("VERBDECK_CONFIG_DIR", config_dir)
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn entries(config_dir: &Path) -> serde_json::Value {
    let output = run_isolated(&["status", "show", "--json"], config_dir);
    assert_eq!(output.status.code(), Some(0));
    serde_json::from_slice(&output.stdout).expect("Should parse JSON output")
}

#[test]
fn test_status_show_empty() {
    let config_dir = TempDir::new().unwrap();
    assert_eq!(entries(config_dir.path()), serde_json::json!({}));
}

#[test]
fn test_status_set_and_show() {
    let config_dir = TempDir::new().unwrap();
    let (_data_dir, data) = temp_small_catalog();
    let data = data.to_str().unwrap();

    let output = run_isolated(&["status", "set", "go", "learning", "--data", data], config_dir.path());
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("go → learning"));
    assert!(config_dir.path().join("state.json").exists());

    assert_eq!(
        entries(config_dir.path()),
        serde_json::json!({ "go": "learning" })
    );

    let output = run_isolated(&["status", "show", "--data", data], config_dir.path());
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Learning"));
    assert!(stdout.contains("Total"));
    assert!(stdout.contains("go"));
}

#[test]
fn test_status_set_overwrites() {
    let config_dir = TempDir::new().unwrap();
    let (_data_dir, data) = temp_small_catalog();
    let data = data.to_str().unwrap();

    run_isolated(&["status", "set", "go", "learning", "--data", data], config_dir.path());
    run_isolated(&["status", "set", "go", "learned", "--data", data], config_dir.path());
    run_isolated(&["status", "set", "walk", "learning", "--data", data], config_dir.path());

    assert_eq!(
        entries(config_dir.path()),
        serde_json::json!({ "go": "learned", "walk": "learning" })
    );
}

#[test]
fn test_status_reset() {
    let config_dir = TempDir::new().unwrap();
    let (_data_dir, data) = temp_small_catalog();

    run_isolated(
        &["status", "set", "go", "learned", "--data", data.to_str().unwrap()],
        config_dir.path(),
    );

    let output = run_isolated(&["status", "reset"], config_dir.path());
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("All verb statuses reset."));
    assert_eq!(entries(config_dir.path()), serde_json::json!({}));
}

#[test]
fn test_status_set_unknown_verb() {
    let config_dir = TempDir::new().unwrap();
    let (_data_dir, data) = temp_small_catalog();

    let output = run_isolated(
        &["status", "set", "fly", "learned", "--data", data.to_str().unwrap()],
        config_dir.path(),
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown verb 'fly'"));
    assert!(!config_dir.path().join("state.json").exists());
}

#[test]
fn test_status_set_invalid_status() {
    let config_dir = TempDir::new().unwrap();
    let (_data_dir, data) = temp_small_catalog();

    let output = run_isolated(
        &["status", "set", "go", "mastered", "--data", data.to_str().unwrap()],
        config_dir.path(),
    );
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_status_malformed_state_reads_as_empty() {
    let config_dir = TempDir::new().unwrap();
    fs::write(config_dir.path().join("state.json"), "not json at all").unwrap();

    assert_eq!(entries(config_dir.path()), serde_json::json!({}));
}

#[test]
fn test_status_write_failure_is_io_error() {
    let scratch = TempDir::new().unwrap();
    let (_data_dir, data) = temp_small_catalog();

    // A regular file where the config directory should be
    let blocked = scratch.path().join("blocked");
    fs::write(&blocked, "").unwrap();

    let output = run_isolated(
        &["status", "set", "go", "learned", "--data", data.to_str().unwrap()],
        &blocked,
    );
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to save status"));
}
