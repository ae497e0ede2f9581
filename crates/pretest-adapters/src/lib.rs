//! Pretest Adapters - External adapters for pretest.
//!
//! This crate provides adapters for:
//! - Filesystem creative source
//! - Tesseract OCR (command line)
//! - Artifact storage (raw copies and heatmaps)

pub mod artifacts;
pub mod fs;
pub mod ocr;

pub use artifacts::ArtifactStore;
pub use fs::{load_creative, FsCreativeSource};
pub use ocr::TesseractOcr;
