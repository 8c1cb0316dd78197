//! CLI Integration Tests
//!
//! These tests verify that the CLI commands work correctly end-to-end.
//! They test the actual binary behavior, not just the library.
//!
//! Run with:
//! ```bash
//! cargo test --test cli_integration
//! ```

use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

const SENTENCE: &str =
    "The quick brown fox jumps over the lazy dog who was sleeping under the oak tree";
const SENTENCE_HEX_ROOT: &str = "bfddffb24e5f62ca7b157da0d88ed012545de73e1d3a5a5cc12838259cdc8109";
const SENTENCE_RAW_ROOT: &str = "a412463b7a1e54770fbb0f5fe87baa44d7633644955647dc0493575126934fab";

/// Run merkle-audit with an isolated config dir and return (stdout, stderr, success)
fn run(args: &[&str], home: &Path) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_merkle-audit"))
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute merkle-audit");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.success(),
    )
}

fn parse_json(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout.trim()).expect("stdout should be JSON")
}

// ============================================================================
// Root / Show
// ============================================================================

#[test]
fn test_cli_root_default_sha256() {
    let home = tempdir().unwrap();
    let (stdout, stderr, success) = run(&["root", SENTENCE], home.path());
    assert!(success, "root should succeed: {stderr}");

    let json = parse_json(&stdout);
    assert_eq!(json["root"], SENTENCE_RAW_ROOT);
    assert_eq!(json["leaves"], 16);
    assert_eq!(json["height"], 4);
    assert_eq!(json["algorithm"], "sha256");
}

#[test]
fn test_cli_root_hex_join_matches_reference() {
    let home = tempdir().unwrap();
    let (stdout, _stderr, success) = run(&["--hex-join", "root", SENTENCE], home.path());
    assert!(success);
    assert_eq!(parse_json(&stdout)["root"], SENTENCE_HEX_ROOT);
}

#[test]
fn test_cli_root_from_file_and_config() {
    let home = tempdir().unwrap();
    let input = home.path().join("input.txt");
    std::fs::write(&input, SENTENCE).unwrap();
    let config = home.path().join("config.json");
    std::fs::write(&config, r#"{"hex_join": true}"#).unwrap();

    let (stdout, _stderr, success) = run(
        &[
            "-c",
            config.to_str().unwrap(),
            "root",
            "--file",
            input.to_str().unwrap(),
        ],
        home.path(),
    );
    assert!(success);
    assert_eq!(parse_json(&stdout)["root"], SENTENCE_HEX_ROOT);
}

#[test]
fn test_cli_root_empty_input_fails() {
    let home = tempdir().unwrap();
    let (_stdout, stderr, success) = run(&["root", "   "], home.path());
    assert!(!success, "empty input should fail");
    assert!(stderr.contains("zero chunks"), "stderr: {stderr}");
}

#[test]
fn test_cli_show_text() {
    let home = tempdir().unwrap();
    let (stdout, _stderr, success) = run(&["-f", "text", "show", "a b c"], home.path());
    assert!(success);

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 7);
    assert!(lines[2].starts_with("    a - "));
    assert!(lines[5].starts_with("    c - "));
}

// ============================================================================
// Trail / Verify
// ============================================================================

#[test]
fn test_cli_trail_then_verify() {
    let home = tempdir().unwrap();
    let (stdout, _stderr, success) = run(&["trail", "a b c", "--chunk", "c"], home.path());
    assert!(success);

    let json = parse_json(&stdout);
    assert_eq!(
        json["root"],
        "d31a37ef6ac14a2db1470c4316beb5592e6afd4465022339adafda76a18ffabe"
    );
    assert_eq!(json["index"], 2);
    let trail = json["trail"].as_array().unwrap();
    assert_eq!(trail.len(), 3);
    assert_eq!(trail[0]["branch"], "left");
    assert_eq!(trail[0]["hash"], json["leaf"]);
    assert_eq!(trail[2]["branch"], "root");

    let trail_path = home.path().join("trail.json");
    std::fs::write(&trail_path, &stdout).unwrap();
    let root = json["root"].as_str().unwrap();

    let (stdout, _stderr, success) = run(
        &["verify", "--root", root, "--chunk", "c", "--trail", trail_path.to_str().unwrap()],
        home.path(),
    );
    assert!(success);
    assert_eq!(parse_json(&stdout)["verified"], true);

    let (stdout, _stderr, success) = run(
        &["verify", "--root", root, "--chunk", "x", "--trail", trail_path.to_str().unwrap()],
        home.path(),
    );
    assert!(!success, "tampered chunk should exit non-zero");
    assert_eq!(parse_json(&stdout)["verified"], false);
}

#[test]
fn test_cli_trail_by_index() {
    let home = tempdir().unwrap();
    let (stdout, _stderr, success) = run(&["trail", "a b a", "--index", "2"], home.path());
    assert!(success);
    let json = parse_json(&stdout);
    assert_eq!(json["index"], 2);
    assert_eq!(json["trail"][0]["branch"], "left");
}

#[test]
fn test_cli_trail_unknown_chunk_fails() {
    let home = tempdir().unwrap();
    let (_stdout, stderr, success) = run(&["trail", "a b c", "--chunk", "zzz"], home.path());
    assert!(!success);
    assert!(stderr.contains("Chunk not found"), "stderr: {stderr}");
}

#[test]
fn test_cli_verify_malformed_trail() {
    let home = tempdir().unwrap();
    let trail_path = home.path().join("trail.json");
    let leaf = "ca978112ca1bbdcafac231b39a23dc4da786eff8147c4e72b9807785afee48bb";
    std::fs::write(
        &trail_path,
        format!(r#"[{{"hash":"{leaf}","branch":"right"}}]"#),
    )
    .unwrap();

    let (_stdout, stderr, success) = run(
        &["verify", "--root", leaf, "--leaf", leaf, "--trail", trail_path.to_str().unwrap()],
        home.path(),
    );
    assert!(!success);
    assert!(stderr.contains("Malformed audit trail"), "stderr: {stderr}");
}

// ============================================================================
// Demo
// ============================================================================

#[test]
fn test_cli_demo() {
    let home = tempdir().unwrap();
    let (stdout, _stderr, success) = run(&["demo"], home.path());
    assert!(success);

    let json = parse_json(&stdout);
    assert_eq!(json["root"], SENTENCE_HEX_ROOT);
    assert_eq!(json["trusted_root"], SENTENCE_HEX_ROOT);
    assert_eq!(json["checks"][0]["chunk"], "brown");
    assert_eq!(json["checks"][0]["verified"], true);
    assert_eq!(json["checks"][1]["chunk"], "jimp5");
    assert_eq!(json["checks"][1]["verified"], false);
}
