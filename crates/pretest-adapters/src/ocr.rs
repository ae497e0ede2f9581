//! Tesseract OCR adapter.
//!
//! Shells out to the `tesseract` binary in TSV mode rather than
//! linking libtesseract, so the tool runs without a C++ toolchain and
//! degrades cleanly when tesseract is not installed.

use anyhow::{Context, Result};
use image::DynamicImage;
use pretest_core::{BoundingBox, OcrEngine, OcrWord};
use std::process::Command;
use tracing::{debug, warn};

/// Default language pack selection.
pub const DEFAULT_LANGUAGES: &str = "deu+eng";

/// TSV row level that carries individual words.
const WORD_LEVEL: &str = "5";

/// OCR engine backed by the `tesseract` command line tool.
pub struct TesseractOcr {
    languages: String,
}

impl TesseractOcr {
    /// Creates an engine using the default language packs.
    #[must_use]
    pub fn new() -> Self {
        Self::with_languages(DEFAULT_LANGUAGES)
    }

    /// Creates an engine with an explicit language selection, e.g.
    /// `"deu+eng"`.
    #[must_use]
    pub fn with_languages(languages: &str) -> Self {
        Self {
            languages: languages.to_string(),
        }
    }

    /// Checks whether the `tesseract` binary is on the PATH.
    #[must_use]
    pub fn is_available() -> bool {
        Command::new("tesseract")
            .arg("--version")
            .output()
            .is_ok_and(|out| out.status.success())
    }
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrEngine for TesseractOcr {
    fn recognize(&self, image: &DynamicImage) -> Result<Vec<OcrWord>> {
        let dir = tempfile::tempdir().context("Failed to create temp dir for OCR")?;
        let input = dir.path().join("input.png");
        image
            .save(&input)
            .with_context(|| format!("Failed to write OCR input: {}", input.display()))?;

        let output = Command::new("tesseract")
            .arg(&input)
            .arg("stdout")
            .args(["-l", &self.languages])
            .arg("tsv")
            .output()
            .context("Failed to run tesseract; is it installed?")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("tesseract exited with {}: {}", output.status, stderr.trim());
        }

        let tsv = String::from_utf8_lossy(&output.stdout);
        let words = parse_tsv(&tsv);
        debug!(words = words.len(), "tesseract recognized words");
        Ok(words)
    }
}

/// Parses tesseract TSV output into words.
///
/// Word rows have level 5 and twelve columns; the trailing text column
/// may itself contain tabs, which are kept as part of the word.
fn parse_tsv(tsv: &str) -> Vec<OcrWord> {
    let mut words = Vec::new();

    for line in tsv.lines().skip(1) {
        let fields: Vec<&str> = line.splitn(12, '\t').collect();
        if fields.len() < 12 || fields[0] != WORD_LEVEL {
            continue;
        }

        let text = fields[11].trim();
        if text.is_empty() {
            continue;
        }

        let Some(bbox) = parse_bbox(&fields[6..10]) else {
            warn!("Malformed TSV bbox row skipped: {line}");
            continue;
        };
        let confidence = fields[10].parse::<f32>().unwrap_or(0.0);

        words.push(OcrWord {
            text: text.to_string(),
            bbox,
            confidence,
        });
    }

    words
}

fn parse_bbox(fields: &[&str]) -> Option<BoundingBox> {
    let left = fields[0].parse::<u32>().ok()?;
    let top = fields[1].parse::<u32>().ok()?;
    let width = fields[2].parse::<u32>().ok()?;
    let height = fields[3].parse::<u32>().ok()?;
    Some(BoundingBox::new(left, top, width, height))
}
