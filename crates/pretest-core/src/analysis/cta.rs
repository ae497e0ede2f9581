//! Call-to-action detection over OCR output.
//!
//! Scans recognized words in detection order and flags the first one
//! whose lowercased text contains a keyword as a substring. First
//! match wins; later candidates are never ranked or considered. The
//! matching box is padded into an approximate button region.

use crate::domain::{BoundingBox, CtaCandidate, OcrWord};

/// Multilingual CTA keyword list (German + English).
pub const CTA_KEYWORDS: &[&str] = &[
    "jetzt",
    "shop",
    "kaufen",
    "mehr",
    "info",
    "anmelden",
    "subscribe",
    "buy",
    "learn",
    "mehr erfahren",
];

/// Padding applied to a matched box, as a fraction of its longer side.
pub const PAD_RATIO: f64 = 0.1;

/// Finds the first CTA keyword match among the OCR words.
///
/// Matching is case-insensitive substring containment, so a token like
/// "Jetzt-Kaufen!" matches "jetzt". The returned box is padded by
/// [`PAD_RATIO`] of its longer side on all sides and clamped to the
/// image bounds.
#[must_use]
pub fn detect_cta(words: &[OcrWord], width: u32, height: u32) -> CtaCandidate {
    detect_cta_with(words, width, height, CTA_KEYWORDS, PAD_RATIO)
}

/// Like [`detect_cta`] with a custom keyword list and padding ratio.
#[must_use]
pub fn detect_cta_with(
    words: &[OcrWord],
    width: u32,
    height: u32,
    keywords: &[impl AsRef<str>],
    pad_ratio: f64,
) -> CtaCandidate {
    let hit = words.iter().find(|word| {
        let lowered = word.text.to_lowercase();
        keywords.iter().any(|k| lowered.contains(k.as_ref()))
    });

    let Some(word) = hit else {
        return CtaCandidate::default();
    };

    CtaCandidate {
        detected: true,
        bbox: Some(pad_box(word.bbox, width, height, pad_ratio)),
    }
}

/// Expands a box by `pad_ratio` of its longer side, clamped to the
/// image bounds.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn pad_box(bbox: BoundingBox, width: u32, height: u32, pad_ratio: f64) -> BoundingBox {
    let pad = (pad_ratio * f64::from(bbox.width.max(bbox.height))) as u32;

    let x = bbox.x.saturating_sub(pad);
    let y = bbox.y.saturating_sub(pad);
    let w = (bbox.width + 2 * pad).min(width.saturating_sub(x));
    let h = (bbox.height + 2 * pad).min(height.saturating_sub(y));

    BoundingBox::new(x, y, w, h)
}
