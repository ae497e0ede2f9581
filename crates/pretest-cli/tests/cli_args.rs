//! CLI argument validation tests.
//!
//! Tests command-line argument parsing, validation, and error handling.

#![allow(clippy::unwrap_used)]
#![allow(deprecated)] // cargo_bin deprecation

use assert_cmd::Command;
use predicates::prelude::*;
use pretest_test_support::SyntheticCreativeBuilder;

fn creative_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    SyntheticCreativeBuilder::centered_blob(64, 64)
        .image
        .save(dir.path().join("ad.png"))
        .unwrap();
    dir
}

// === Missing/Invalid Path Tests ===

#[test]
fn test_missing_path_shows_error() {
    let mut cmd = Command::cargo_bin("pretest").unwrap();
    // No path argument at all - error goes to stderr
    cmd.assert().failure().stderr(
        predicate::str::contains("No paths specified")
            .or(predicate::str::contains("required"))
            .or(predicate::str::contains("PATHS")),
    );
}

#[test]
fn test_nonexistent_path_warns_but_continues() {
    // The CLI warns about nonexistent paths but continues (graceful degradation)
    let out = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("pretest").unwrap();
    cmd.arg("/nonexistent/path/to/ad.jpg")
        .arg("--no-ocr")
        .arg("--quiet")
        .args(["--output-dir", out.path().to_str().unwrap()]);

    // Nothing processed, nothing stopped -> exit 0
    cmd.assert().code(0);
}

#[test]
fn test_empty_directory() {
    let temp_dir = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();

    let mut cmd = Command::cargo_bin("pretest").unwrap();
    cmd.arg(temp_dir.path())
        .arg("--no-ocr")
        .arg("--quiet")
        .args(["--output-dir", out.path().to_str().unwrap()]);

    // Empty directory should succeed with no output (exit 0)
    cmd.assert().code(predicate::eq(0));
}

// === Format Validation Tests ===

#[test]
fn test_invalid_format_rejected() {
    let dir = creative_dir();
    let mut cmd = Command::cargo_bin("pretest").unwrap();
    cmd.arg("--format")
        .arg("xml") // Invalid format
        .arg(dir.path().join("ad.png"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("json").or(predicate::str::contains("jsonl")));
}

#[test]
fn test_valid_formats_accepted() {
    let dir = creative_dir();
    let out = tempfile::tempdir().unwrap();

    // Test JSON format
    let mut cmd = Command::cargo_bin("pretest").unwrap();
    cmd.arg("--format")
        .arg("json")
        .arg("--no-ocr")
        .arg("--quiet")
        .args(["--output-dir", out.path().to_str().unwrap()])
        .arg(dir.path().join("ad.png"));

    cmd.assert().code(predicate::in_iter([0, 1]));

    // Test JSONL format
    let mut cmd2 = Command::cargo_bin("pretest").unwrap();
    cmd2.arg("--format")
        .arg("jsonl")
        .arg("--no-ocr")
        .arg("--quiet")
        .args(["--output-dir", out.path().to_str().unwrap()])
        .arg(dir.path().join("ad.png"));

    cmd2.assert().code(predicate::in_iter([0, 1]));
}

// === Placement Tests ===

#[test]
fn test_known_placements_accepted() {
    let dir = creative_dir();
    let out = tempfile::tempdir().unwrap();

    for placement in ["feed", "story", "square"] {
        let mut cmd = Command::cargo_bin("pretest").unwrap();
        cmd.args(["--placement", placement])
            .arg("--no-ocr")
            .arg("--quiet")
            .args(["--output-dir", out.path().to_str().unwrap()])
            .arg(dir.path().join("ad.png"));

        cmd.assert().code(predicate::in_iter([0, 1]));
    }
}

#[test]
fn test_unknown_placement_falls_back_to_feed() {
    // Unknown placements use feed geometry instead of erroring
    let dir = creative_dir();
    let out = tempfile::tempdir().unwrap();

    let mut cmd = Command::cargo_bin("pretest").unwrap();
    cmd.args(["--placement", "carousel"])
        .arg("--no-ocr")
        .arg("--quiet")
        .args(["--output-dir", out.path().to_str().unwrap()])
        .arg(dir.path().join("ad.png"));

    cmd.assert().code(predicate::in_iter([0, 1]));
}

// === Expected Dimensions ===

#[test]
fn test_dimension_mismatch_is_not_fatal() {
    let dir = creative_dir();
    let out = tempfile::tempdir().unwrap();

    let mut cmd = Command::cargo_bin("pretest").unwrap();
    cmd.args(["--expected-width", "1080"])
        .args(["--expected-height", "1920"])
        .arg("--no-ocr")
        .arg("--quiet")
        .args(["--output-dir", out.path().to_str().unwrap()])
        .arg(dir.path().join("ad.png"));

    // The 64x64 creative is still analyzed
    let output = cmd.output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"creative_id\""));
}

// === Help/Version ===

#[test]
fn test_help_shows_usage() {
    let mut cmd = Command::cargo_bin("pretest").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("placement"));
}

#[test]
fn test_version_flag() {
    let mut cmd = Command::cargo_bin("pretest").unwrap();
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("pretest"));
}
