//! OCR engine port.

use crate::domain::OcrWord;

/// Port for text extraction engines.
///
/// Implementations return recognized words in detection order with
/// pixel-coordinate bounding boxes. Empty or whitespace-only tokens
/// must be discarded by the implementation.
pub trait OcrEngine: Send + Sync {
    /// Extracts words and their bounding boxes from the image.
    ///
    /// An image without any text yields an empty list, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine itself fails to run.
    fn recognize(&self, image: &image::DynamicImage) -> anyhow::Result<Vec<OcrWord>>;
}

/// OCR engine that never recognizes anything.
///
/// Used when OCR is disabled or unavailable; the scoring engine's
/// soft-fail CTA path applies naturally.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullOcr;

impl OcrEngine for NullOcr {
    fn recognize(&self, _image: &image::DynamicImage) -> anyhow::Result<Vec<OcrWord>> {
        Ok(Vec::new())
    }
}
