//! Visual analysis pipeline.
//!
//! Stages run sequentially per creative and only read the shared
//! immutable image buffer: saliency, safe-area focus, OCR/CTA,
//! contrast, visual noise. The pipeline is stateless across
//! invocations and performs no retries.

pub mod contrast;
pub mod cta;
pub mod focus;
pub mod heatmap;
pub mod kmeans;
pub mod map;
pub mod noise;
pub mod safe_area;
pub mod saliency;

use anyhow::{ensure, Result};
use tracing::debug;

use crate::domain::{CreativeImage, MetricsBundle, OcrWord, Placement};
use crate::ports::OcrEngine;

use map::ScalarMap;

/// Analysis-stage configuration.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// CTA keyword list; lowercased substring matching.
    pub cta_keywords: Vec<String>,
    /// CTA box padding as a fraction of the longer side.
    pub cta_pad_ratio: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            cta_keywords: cta::CTA_KEYWORDS.iter().map(ToString::to_string).collect(),
            cta_pad_ratio: cta::PAD_RATIO,
        }
    }
}

/// Everything the analysis stage produces for one creative.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Scalar measurements consumed by the scoring engine.
    pub metrics: MetricsBundle,
    /// Saliency map, for heatmap rendering.
    pub saliency: ScalarMap,
    /// Raw OCR words in detection order.
    pub words: Vec<OcrWord>,
}

/// Runs the measurement pipeline over single creatives.
pub struct Analyzer<'a> {
    ocr: &'a dyn OcrEngine,
    config: AnalysisConfig,
}

impl<'a> Analyzer<'a> {
    /// Creates an analyzer using the given OCR engine and defaults for
    /// everything else.
    #[must_use]
    pub fn new(ocr: &'a dyn OcrEngine) -> Self {
        Self::with_config(ocr, AnalysisConfig::default())
    }

    /// Creates an analyzer with explicit configuration.
    #[must_use]
    pub const fn with_config(ocr: &'a dyn OcrEngine, config: AnalysisConfig) -> Self {
        Self { ocr, config }
    }

    /// Measures one creative for the given placement.
    ///
    /// # Errors
    ///
    /// Fails fast on a zero-sized image (caller contract violation)
    /// and propagates OCR engine failures.
    pub fn analyze(&self, creative: &CreativeImage, placement: Placement) -> Result<Analysis> {
        ensure!(
            creative.width > 0 && creative.height > 0,
            "cannot analyze zero-sized image: {}",
            creative.path
        );

        let rgb = creative.to_rgb8();
        let gray = creative.to_luma8();

        let saliency = saliency::saliency_map(&gray);
        let mask = safe_area::build_mask(creative.width, creative.height, placement);
        let focus_ratio = focus::focus_ratio(&saliency, &mask);
        debug!(
            path = %creative.path,
            focus_ratio,
            "saliency focus computed"
        );

        let words: Vec<OcrWord> = self
            .ocr
            .recognize(&creative.image)?
            .into_iter()
            .filter(|w| !w.text.trim().is_empty())
            .collect();
        debug!(path = %creative.path, words = words.len(), "OCR complete");

        let cta = cta::detect_cta_with(
            &words,
            creative.width,
            creative.height,
            &self.config.cta_keywords,
            self.config.cta_pad_ratio,
        );

        let contrast_ratio = contrast::contrast_ratio(&rgb);
        let visual_noise = noise::visual_noise(&rgb, &gray);

        let metrics = MetricsBundle {
            width: creative.width,
            height: creative.height,
            placement,
            saliency_focus_ratio: focus_ratio,
            text_words: words.len(),
            text_boxes: words.len(),
            contrast_ratio,
            visual_noise,
            cta_detected: cta.detected,
            cta_box: cta.bbox,
            // Logo detection is not implemented in this version
            logo_detected: false,
        };

        Ok(Analysis {
            metrics,
            saliency,
            words,
        })
    }
}
