use std::{fs, process::Output};

use assert_cmd::Command;
use tempfile::TempDir;

fn convcom(dir: &TempDir, args: &[&str]) -> Output {
    Command::cargo_bin("convcom")
        .unwrap()
        .current_dir(dir.path())
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn test_no_flag_prints_usage() {
    let dir = TempDir::new().unwrap();
    let output = convcom(&dir, &[]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("No valid flag provided."));
}

#[test]
fn test_init_creates_default_config() {
    let dir = TempDir::new().unwrap();
    let output = convcom(&dir, &["-init"]);

    assert!(output.status.success());

    let content = fs::read_to_string(dir.path().join("convcom.json")).unwrap();
    let config: serde_json::Value = serde_json::from_str(&content).unwrap();

    assert_eq!(
        config["types"],
        serde_json::json!([
            "build", "ci", "chore", "docs", "feat", "fix", "perf", "refactor", "revert", "style",
            "test"
        ])
    );
    assert_eq!(config["scopes"], serde_json::json!([]));
}

#[test]
fn test_init_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();
    let existing = "{\"types\": [\"feat\"], \"scopes\": [\"api\"]}";
    fs::write(dir.path().join("convcom.json"), existing).unwrap();

    let output = convcom(&dir, &["--init"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("already exists"));
    assert_eq!(
        fs::read_to_string(dir.path().join("convcom.json")).unwrap(),
        existing
    );
}

#[test]
fn test_commit_without_config_fails() {
    let dir = TempDir::new().unwrap();
    let output = convcom(&dir, &["-commit", "-dryrun"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Configuration file not found"));
}

#[test]
fn test_commit_with_malformed_config_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("convcom.json"), "{\"types\": ").unwrap();

    let output = convcom(&dir, &["-commit"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid configuration"));
}

#[test]
fn test_dryrun_alone_is_rejected() {
    let dir = TempDir::new().unwrap();
    let output = convcom(&dir, &["-dryrun"]);

    assert!(!output.status.success());
    assert!(!dir.path().join("convcom.json").exists());
}

#[test]
fn test_completions() {
    let dir = TempDir::new().unwrap();
    let output = convcom(&dir, &["--completions", "bash"]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("convcom"));
}
