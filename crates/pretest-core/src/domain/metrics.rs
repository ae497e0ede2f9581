//! Measurement types produced by the analysis stage.

use serde::{Deserialize, Serialize};

use super::{BoundingBox, Placement};

/// A single word recognized by the OCR engine.
///
/// Words keep their detection order; reading order is not guaranteed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrWord {
    /// Recognized text, trimmed.
    pub text: String,
    /// Word bounding box in image coordinates.
    pub bbox: BoundingBox,
    /// Engine confidence (0-100). Not used by scoring.
    pub confidence: f32,
}

/// Result of CTA detection: at most one candidate region.
///
/// The first OCR word matching a call-to-action keyword wins; later,
/// possibly better matches are never considered.
#[derive(Debug, Clone, Copy, Default)]
pub struct CtaCandidate {
    /// Whether any CTA keyword matched.
    pub detected: bool,
    /// Padded button region for the matching word.
    pub bbox: Option<BoundingBox>,
}

/// All scalar measurements for one creative, produced once per
/// analysis and passed immutably to the scoring engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsBundle {
    /// Creative width in pixels.
    pub width: u32,
    /// Creative height in pixels.
    pub height: u32,
    /// Placement the safe area was built for.
    pub placement: Placement,
    /// Fraction of total saliency energy inside the safe area (0-1).
    pub saliency_focus_ratio: f64,
    /// Number of recognized words.
    pub text_words: usize,
    /// Number of word bounding boxes (equals `text_words` today).
    pub text_boxes: usize,
    /// WCAG-style contrast ratio between the two dominant colors (>= 1).
    pub contrast_ratio: f64,
    /// Busy-ness heuristic, nominally 0-1 but not clamped at the source.
    pub visual_noise: f64,
    /// Whether a CTA keyword was found.
    pub cta_detected: bool,
    /// Padded CTA button region, when detected.
    pub cta_box: Option<BoundingBox>,
    /// Logo detection is a stub in this version; always false.
    pub logo_detected: bool,
}
