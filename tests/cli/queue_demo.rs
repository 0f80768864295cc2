//! `utilkit queue-demo` tests

use crate::common::{run_utilkit, stdout_of};
use tempfile::TempDir;

#[test]
fn test_demo_reports_all_messages() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");

    let output = run_utilkit(
        &config,
        &["queue-demo", "--producers", "2", "--consumers", "3", "--messages", "15", "--capacity", "3"],
    );
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = stdout_of(&output);
    assert!(stdout.contains("consumer-0"));
    assert!(stdout.contains("consumer-2"));
    assert!(stdout.contains("accepted"));
    assert!(stdout.contains("30"));
}

#[test]
fn test_zero_capacity_from_config_fails() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");

    let output = run_utilkit(&config, &["config", "set", "queue.capacity=0"]);
    assert!(output.status.success());

    let output = run_utilkit(&config, &["queue-demo", "--messages", "1"]);
    assert!(!output.status.success());
}
