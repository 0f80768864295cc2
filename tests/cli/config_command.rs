//! `utilkit config` tests

use crate::common::{run_utilkit, stdout_of};
use tempfile::TempDir;

#[test]
fn test_set_then_get() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");

    let output = run_utilkit(&config, &["config", "set", "queue.capacity=16", "name=demo"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(config.is_file());

    let output = run_utilkit(&config, &["config", "get", "queue.capacity"]);
    assert!(output.status.success());
    assert_eq!(stdout_of(&output).trim(), "16");

    let output = run_utilkit(&config, &["config", "get", "name"]);
    assert_eq!(stdout_of(&output).trim(), "demo");
}

#[test]
fn test_show_includes_defaults() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");

    let output = run_utilkit(&config, &["config", "show"]);
    assert!(output.status.success());

    let shown: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(shown["queue"]["capacity"], 10_000);
}

#[test]
fn test_get_missing_key_fails() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");

    let output = run_utilkit(&config, &["config", "get", "no.such.key"]);
    assert!(!output.status.success());
    assert!(stdout_of(&output).is_empty());
}
