//! Score report types.

use serde::{Deserialize, Serialize};

use super::{BoundingBox, MetricsBundle};

/// Three-tier verdict derived from the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    /// Composite >= 75: ready for spend.
    Go,
    /// Composite in [60, 75): rework recommended.
    Improve,
    /// Composite < 60: do not spend.
    Stop,
}

impl Verdict {
    /// Report string for this verdict.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Go => "GO",
            Self::Improve => "IMPROVE",
            Self::Stop => "STOP",
        }
    }
}

/// Component and derived scores, each on a 0-100 scale.
///
/// Pure function of the [`MetricsBundle`]; identical bundles always
/// produce identical scores. Presented values are rounded to one
/// decimal; the composite is formed from the unrounded components.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Scores {
    /// Saliency captured by the safe area.
    pub attention: f64,
    /// Low text volume, low noise, high contrast.
    pub clarity: f64,
    /// Visibility of the detected CTA region.
    pub cta_visibility: f64,
    /// Logo presence; fixed fallback while logo detection is a stub.
    pub branding: f64,
    /// Derived: 0.6 x clarity + 0.4 x attention.
    pub readability: f64,
    /// Derived: inverted presentation of the noise metric.
    pub visual_noise: f64,
    /// Weighted aggregate used for the verdict.
    pub composite: f64,
}

/// Metrics echoed back in the report, rounded for presentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    /// Number of recognized words.
    pub text_words: usize,
    /// Number of word bounding boxes.
    pub text_boxes: usize,
    /// Contrast ratio, rounded to 2 decimals.
    pub contrast_ratio: f64,
    /// Safe-area focus ratio, rounded to 3 decimals.
    pub saliency_focus_ratio: f64,
    /// Whether a CTA keyword was found.
    pub cta_detected: bool,
    /// Padded CTA region, when detected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_box: Option<BoundingBox>,
    /// Always false in this version.
    pub logo_detected: bool,
    /// Visual noise heuristic, rounded to 3 decimals.
    pub visual_noise: f64,
}

impl From<&MetricsBundle> for MetricsSummary {
    fn from(bundle: &MetricsBundle) -> Self {
        Self {
            text_words: bundle.text_words,
            text_boxes: bundle.text_boxes,
            contrast_ratio: round_to(bundle.contrast_ratio, 2),
            saliency_focus_ratio: round_to(bundle.saliency_focus_ratio, 3),
            cta_detected: bundle.cta_detected,
            cta_box: bundle.cta_box,
            logo_detected: bundle.logo_detected,
            visual_noise: round_to(bundle.visual_noise, 3),
        }
    }
}

/// Complete pretest report for one creative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PretestReport {
    /// Unique identifier assigned to this analysis.
    pub creative_id: String,
    /// Source file path.
    pub path: String,
    /// Timestamp of analysis (RFC 3339).
    pub timestamp: String,
    /// Creative dimensions as "WxH".
    pub format: String,
    /// Component and derived scores.
    pub scores: Scores,
    /// Measurement summary.
    pub metrics: MetricsSummary,
    /// Path of the persisted heatmap image, if one was written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heatmap_path: Option<String>,
    /// GO / IMPROVE / STOP.
    pub status: Verdict,
}

/// Rounds to the given number of decimal places.
#[must_use]
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places.min(9) as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_strings() {
        assert_eq!(Verdict::Go.as_str(), "GO");
        assert_eq!(Verdict::Improve.as_str(), "IMPROVE");
        assert_eq!(Verdict::Stop.as_str(), "STOP");
    }

    #[test]
    fn test_verdict_serializes_uppercase() {
        let json = serde_json::to_string(&Verdict::Improve).expect("serialize");
        assert_eq!(json, "\"IMPROVE\"");
    }

    #[test]
    fn test_round_to() {
        assert!((round_to(70.04, 1) - 70.0).abs() < f64::EPSILON);
        assert!((round_to(4.567, 2) - 4.57).abs() < f64::EPSILON);
        assert!((round_to(0.1234, 3) - 0.123).abs() < f64::EPSILON);
    }
}
