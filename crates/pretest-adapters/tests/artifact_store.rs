//! Integration tests for the artifact store.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use image::{Rgb, RgbImage};
use pretest_adapters::ArtifactStore;
use pretest_test_support::SyntheticCreativeBuilder;

#[test]
fn test_open_creates_directory() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("out").join("artifacts");

    let store = ArtifactStore::open(&target).expect("should create directory");
    assert!(target.is_dir());
    assert_eq!(store.dir(), target);
}

#[test]
fn test_persist_raw_names_by_creative_id() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("banner.png");
    SyntheticCreativeBuilder::flat_gray(8, 8)
        .image
        .save(&source)
        .unwrap();

    let out = dir.path().join("out");
    let store = ArtifactStore::open(&out).unwrap();
    let raw = store.persist_raw("abc-123", &source).expect("should copy");

    assert!(raw.is_file());
    assert_eq!(
        raw.file_name().unwrap().to_str().unwrap(),
        "abc-123_raw_banner.png"
    );
}

#[test]
fn test_persist_heatmap_derives_name_from_raw() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("banner.jpg");
    SyntheticCreativeBuilder::flat_gray(8, 8)
        .image
        .save(&source)
        .unwrap();

    let store = ArtifactStore::open(&dir.path().join("out")).unwrap();
    let raw = store.persist_raw("abc-123", &source).unwrap();

    let heatmap = RgbImage::from_pixel(8, 8, Rgb([255, 0, 0]));
    let path = store.persist_heatmap(&raw, &heatmap).expect("should save");

    assert!(path.is_file());
    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "abc-123_heatmap_banner.png"
    );

    let loaded = image::open(&path).unwrap().to_rgb8();
    assert_eq!(loaded.get_pixel(4, 4).0, [255, 0, 0]);
}

#[test]
fn test_persist_raw_missing_source_fails() {
    let dir = tempfile::tempdir().unwrap();
    let store = ArtifactStore::open(&dir.path().join("out")).unwrap();

    let result = store.persist_raw("id", &dir.path().join("missing.png"));
    assert!(result.is_err());
}
