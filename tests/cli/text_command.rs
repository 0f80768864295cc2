//! `utilkit text` tests

use crate::common::{run_utilkit, stdout_of};
use tempfile::TempDir;

fn text(args: &[&str]) -> String {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    let mut full = vec!["text"];
    full.extend_from_slice(args);

    let output = run_utilkit(&config, &full);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    stdout_of(&output)
}

#[test]
fn test_dates() {
    assert_eq!(
        text(&["dates", "released 2023-5-6, patched 2023/12/25"]),
        "2023-05-06\n2023-12-25\n"
    );
}

#[test]
fn test_normalize_modes() {
    assert_eq!(text(&["normalize", "使用  Rust   编写"]), "使用Rust编写\n");
    assert_eq!(
        text(&["normalize", "--mode", "strip", "--replace", "-", "a   b"]),
        "a-b\n"
    );
}

#[test]
fn test_similarity_and_escape() {
    assert_eq!(text(&["similarity", "abcd", "bcde"]), "0.7500\n");
    assert_eq!(text(&["escape", "中"]), "\\u{4e2d}\n");
}

#[test]
fn test_classify_prints_table() {
    let output = text(&["classify", "a中"]);
    assert!(output.contains("U+0061"));
    assert!(output.contains("U+4E2D"));
}
