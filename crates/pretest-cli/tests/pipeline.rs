//! Pipeline integration tests using synthetic creatives.
//!
//! Runs the binary end to end with programmatically generated images
//! and checks verdicts, exit codes and persisted artifacts.

#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(deprecated)] // cargo_bin deprecation

use assert_cmd::Command;
use predicates::prelude::*;
use pretest_test_support::SyntheticCreativeBuilder;
use serde_json::Value;

/// Create a temporary directory with synthetic creatives.
fn create_creatives(creatives: Vec<(&str, image::DynamicImage)>) -> tempfile::TempDir {
    let temp_dir = tempfile::tempdir().unwrap();

    for (name, img) in creatives {
        let path = temp_dir.path().join(name);
        img.save(&path).unwrap();
    }

    temp_dir
}

#[test]
fn test_flat_creative_gets_stop_verdict() {
    // Nothing to look at: zero attention drags the composite below 60
    let flat = SyntheticCreativeBuilder::flat_gray(128, 128);
    let temp_dir = create_creatives(vec![("flat.png", flat.image.clone())]);
    let out = tempfile::tempdir().unwrap();

    let mut cmd = Command::cargo_bin("pretest").unwrap();
    cmd.arg("--no-ocr")
        .arg("--quiet")
        .args(["--output-dir", out.path().to_str().unwrap()])
        .arg(temp_dir.path().join("flat.png"));

    let output = cmd.output().unwrap();
    assert_eq!(output.status.code(), Some(1), "STOP verdict sets exit 1");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let report: Value = serde_json::from_str(stdout.lines().next().unwrap()).unwrap();
    assert_eq!(report["status"], "STOP");
    assert!(report["scores"]["composite"].as_f64().unwrap() < 60.0);
}

#[test]
fn test_centered_subject_scores_higher_than_corner_subject() {
    let centered = SyntheticCreativeBuilder::centered_blob(128, 128);
    let corner = SyntheticCreativeBuilder::corner_blob(128, 128);
    let temp_dir = create_creatives(vec![
        ("centered.png", centered.image.clone()),
        ("corner.png", corner.image.clone()),
    ]);
    let out = tempfile::tempdir().unwrap();

    let mut cmd = Command::cargo_bin("pretest").unwrap();
    cmd.arg("--no-ocr")
        .arg("--quiet")
        .args(["--output-dir", out.path().to_str().unwrap()])
        .arg(temp_dir.path());

    let output = cmd.output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    let mut attention_by_name = std::collections::HashMap::new();
    for line in stdout.lines().filter(|l| !l.trim().is_empty()) {
        let report: Value = serde_json::from_str(line).unwrap();
        let path = report["path"].as_str().unwrap().to_string();
        let attention = report["scores"]["attention"].as_f64().unwrap();
        attention_by_name.insert(path, attention);
    }
    assert_eq!(attention_by_name.len(), 2);

    let centered_attention = attention_by_name
        .iter()
        .find(|(k, _)| k.ends_with("centered.png"))
        .map(|(_, v)| *v)
        .unwrap();
    let corner_attention = attention_by_name
        .iter()
        .find(|(k, _)| k.ends_with("corner.png"))
        .map(|(_, v)| *v)
        .unwrap();

    assert!(
        centered_attention > corner_attention,
        "centered subject should capture more safe-area saliency \
         ({centered_attention} vs {corner_attention})"
    );
}

#[test]
fn test_artifacts_written_to_output_dir() {
    let creative = SyntheticCreativeBuilder::centered_blob(64, 64);
    let temp_dir = create_creatives(vec![("banner.png", creative.image.clone())]);
    let out = tempfile::tempdir().unwrap();

    let mut cmd = Command::cargo_bin("pretest").unwrap();
    cmd.arg("--no-ocr")
        .arg("--quiet")
        .args(["--output-dir", out.path().to_str().unwrap()])
        .arg(temp_dir.path().join("banner.png"));

    cmd.assert().code(predicate::in_iter([0, 1]));

    let names: Vec<String> = std::fs::read_dir(out.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();

    assert_eq!(names.len(), 2, "raw copy and heatmap, got {names:?}");
    assert!(names
        .iter()
        .any(|n| n.contains("_raw_") && n.ends_with("banner.png")));
    assert!(names
        .iter()
        .any(|n| n.contains("_heatmap_") && n.ends_with(".png")));
}

#[test]
fn test_corrupt_file_skipped_batch_continues() {
    let good = SyntheticCreativeBuilder::centered_blob(64, 64);
    let temp_dir = create_creatives(vec![("good.png", good.image.clone())]);
    std::fs::write(temp_dir.path().join("bad.png"), b"not an image").unwrap();
    let out = tempfile::tempdir().unwrap();

    let mut cmd = Command::cargo_bin("pretest").unwrap();
    cmd.arg("--no-ocr")
        .args(["--output-dir", out.path().to_str().unwrap()])
        .arg(temp_dir.path());

    let output = cmd.output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    // The good creative still produces a report
    let reports: Vec<&str> = stdout.lines().filter(|l| !l.trim().is_empty()).collect();
    assert_eq!(reports.len(), 1);
    assert!(stderr.contains("Skipping"), "stderr: {stderr}");
}

#[test]
fn test_all_inputs_unreadable_fails_the_run() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(temp_dir.path().join("bad.png"), b"not an image").unwrap();
    let out = tempfile::tempdir().unwrap();

    let mut cmd = Command::cargo_bin("pretest").unwrap();
    cmd.arg("--no-ocr")
        .arg("--quiet")
        .args(["--output-dir", out.path().to_str().unwrap()])
        .arg(temp_dir.path().join("bad.png"));

    cmd.assert().code(2);
}

#[test]
fn test_placement_changes_focus_ratio() {
    // A bright band between 10% and 15% of the frame height lies
    // inside the story safe area (top edge at 10%) but above the feed
    // safe area (top edge at 15%)
    let band = image::DynamicImage::ImageRgb8(image::RgbImage::from_fn(128, 256, |x, y| {
        if (40..88).contains(&x) && (27..38).contains(&y) {
            image::Rgb([245, 245, 245])
        } else {
            image::Rgb([12, 12, 12])
        }
    }));
    let temp_dir = create_creatives(vec![("tall.png", band)]);
    let out = tempfile::tempdir().unwrap();

    let mut focus = std::collections::HashMap::new();
    for placement in ["feed", "story"] {
        let mut cmd = Command::cargo_bin("pretest").unwrap();
        cmd.args(["--placement", placement])
            .arg("--no-ocr")
            .arg("--quiet")
            .args(["--output-dir", out.path().to_str().unwrap()])
            .arg(temp_dir.path().join("tall.png"));

        let output = cmd.output().unwrap();
        let stdout = String::from_utf8_lossy(&output.stdout);
        let report: Value = serde_json::from_str(stdout.lines().next().unwrap()).unwrap();
        focus.insert(
            placement,
            report["metrics"]["saliency_focus_ratio"].as_f64().unwrap(),
        );
    }

    assert!(
        focus.values().all(|f| *f > 0.0),
        "focus ratios: {focus:?}"
    );
    assert!(
        focus["story"] > focus["feed"],
        "story safe area should capture the top band: {focus:?}"
    );
}

#[test]
fn test_deterministic_scores_across_runs() {
    let creative = SyntheticCreativeBuilder::two_tone_halves(96, 96);
    let temp_dir = create_creatives(vec![("ad.png", creative.image.clone())]);
    let out = tempfile::tempdir().unwrap();

    let mut composites = Vec::new();
    for _ in 0..2 {
        let mut cmd = Command::cargo_bin("pretest").unwrap();
        cmd.arg("--no-ocr")
            .arg("--quiet")
            .args(["--output-dir", out.path().to_str().unwrap()])
            .arg(temp_dir.path().join("ad.png"));

        let output = cmd.output().unwrap();
        let stdout = String::from_utf8_lossy(&output.stdout);
        let report: Value = serde_json::from_str(stdout.lines().next().unwrap()).unwrap();
        composites.push(report["scores"]["composite"].as_f64().unwrap());
    }

    assert!(
        (composites[0] - composites[1]).abs() < f64::EPSILON,
        "same creative must score identically: {composites:?}"
    );
}
