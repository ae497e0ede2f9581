//! Scoring engine: pure functions from metrics to scores.
//!
//! All weight constants are part of the observable contract and live
//! in [`ScoringConfig`] so they can be tuned per customer without
//! touching algorithm code. Two runs over identical metrics always
//! produce identical scores.

use crate::domain::{round_to, MetricsBundle, Scores, Verdict};

/// Weights and thresholds of the scoring model.
///
/// The defaults are the calibrated production values; every component
/// score is a weighted sum of sub-components clamped to `[0, 1]`,
/// scaled by 100, so scores stay in `[0, 100]` by construction.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    /// Composite weight of the attention score.
    pub attention_weight: f64,
    /// Composite weight of the clarity score.
    pub clarity_weight: f64,
    /// Composite weight of the CTA visibility score.
    pub cta_weight: f64,
    /// Composite weight of the branding score.
    pub branding_weight: f64,

    /// Word count at which the text penalty saturates.
    pub text_word_cap: f64,
    /// Clarity sub-weights: text, noise, contrast.
    pub clarity_text_weight: f64,
    /// Weight of the inverted noise penalty within clarity.
    pub clarity_noise_weight: f64,
    /// Weight of the normalized contrast within clarity.
    pub clarity_contrast_weight: f64,
    /// Contrast ratio span used for normalization (21:1 maps to 1).
    pub contrast_span: f64,

    /// Score assigned when no CTA was detected (soft fail, not zero).
    pub cta_missing_score: f64,
    /// CTA area ratio considered ideal (~3.5% of the image).
    pub cta_target_area_ratio: f64,
    /// Fixed proxy for saliency mass on the CTA region.
    ///
    /// Placeholder for a true saliency-over-box integral; replacing it
    /// with the real integral would change CTA scores materially.
    pub cta_saliency_proxy: f64,
    /// CTA sub-weights: saliency, area, centering.
    pub cta_saliency_weight: f64,
    /// Weight of the area component within the CTA score.
    pub cta_area_weight: f64,
    /// Weight of the centering component within the CTA score.
    pub cta_center_weight: f64,

    /// Score assigned while logo detection is a stub (mild penalty).
    pub branding_fallback_score: f64,

    /// Readability blend: clarity share.
    pub readability_clarity_weight: f64,
    /// Readability blend: attention share.
    pub readability_attention_weight: f64,

    /// Composite at or above this is a GO.
    pub go_threshold: f64,
    /// Composite at or above this (and below GO) is an IMPROVE.
    pub improve_threshold: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            attention_weight: 0.35,
            clarity_weight: 0.25,
            cta_weight: 0.20,
            branding_weight: 0.20,
            text_word_cap: 22.0,
            clarity_text_weight: 0.45,
            clarity_noise_weight: 0.25,
            clarity_contrast_weight: 0.30,
            contrast_span: 20.0,
            cta_missing_score: 35.0,
            cta_target_area_ratio: 0.035,
            cta_saliency_proxy: 0.8,
            cta_saliency_weight: 0.5,
            cta_area_weight: 0.3,
            cta_center_weight: 0.2,
            branding_fallback_score: 55.0,
            readability_clarity_weight: 0.6,
            readability_attention_weight: 0.4,
            go_threshold: 75.0,
            improve_threshold: 60.0,
        }
    }
}

fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Attention: share of saliency captured by the safe area.
#[must_use]
pub fn attention_score(focus_ratio: f64) -> f64 {
    100.0 * clamp01(focus_ratio)
}

/// Clarity: little text, low visual noise, strong contrast.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn clarity_score(
    text_words: usize,
    visual_noise: f64,
    contrast_ratio: f64,
    config: &ScoringConfig,
) -> f64 {
    let text_penalty = (text_words as f64 / config.text_word_cap).min(1.0);
    let noise_penalty = clamp01(visual_noise);
    let contrast_norm = clamp01((contrast_ratio - 1.0) / config.contrast_span);
    100.0
        * (config.clarity_text_weight * (1.0 - text_penalty)
            + config.clarity_noise_weight * (1.0 - noise_penalty)
            + config.clarity_contrast_weight * contrast_norm)
}

/// CTA visibility from area share, centering and the saliency proxy.
///
/// Without a detected CTA this returns the configured soft-fail score
/// rather than zero.
#[must_use]
pub fn cta_visibility_score(
    detected: bool,
    area_ratio: f64,
    center_dist: f64,
    saliency_on_cta: f64,
    config: &ScoringConfig,
) -> f64 {
    if !detected {
        return config.cta_missing_score;
    }
    let area_component = (area_ratio / config.cta_target_area_ratio).min(1.0);
    let center_component = 1.0 - clamp01(center_dist);
    let sal_component = clamp01(saliency_on_cta);
    100.0
        * (config.cta_saliency_weight * sal_component
            + config.cta_area_weight * area_component
            + config.cta_center_weight * center_component)
}

/// Branding score. Logo detection is a stub in this version, so this
/// always takes the fallback path: a mild penalty, not zero.
#[must_use]
pub fn branding_score(logo_detected: bool, config: &ScoringConfig) -> f64 {
    if logo_detected {
        // Unreachable until a logo detector ships; kept so the
        // capability gap stays visible at the scoring seam.
        100.0
    } else {
        config.branding_fallback_score
    }
}

/// CTA geometry derived from the padded box.
fn cta_geometry(bundle: &MetricsBundle) -> (f64, f64) {
    let Some(bbox) = bundle.cta_box else {
        return (0.0, 1.0);
    };

    #[allow(clippy::cast_precision_loss)]
    let image_area = (f64::from(bundle.width) * f64::from(bundle.height)).max(1.0);
    #[allow(clippy::cast_precision_loss)]
    let area_ratio = bbox.area() as f64 / image_area;

    // Euclidean distance from the box center to the image center, in
    // half-extent-normalized units, capped at 1
    let (cx, cy) = bbox.center();
    let half_w = f64::from(bundle.width) / 2.0;
    let half_h = f64::from(bundle.height) / 2.0;
    let dx = (cx - half_w).abs() / half_w.max(1.0);
    let dy = (cy - half_h).abs() / half_h.max(1.0);
    let center_dist = (dx * dx + dy * dy).sqrt().min(1.0);

    (area_ratio, center_dist)
}

/// Computes the full score set and verdict for one metrics bundle.
///
/// Reported values are rounded to one decimal; the composite and the
/// verdict are formed from the unrounded components.
#[must_use]
pub fn compute_scores(bundle: &MetricsBundle, config: &ScoringConfig) -> (Scores, Verdict) {
    let attention = attention_score(bundle.saliency_focus_ratio);
    let clarity = clarity_score(
        bundle.text_words,
        bundle.visual_noise,
        bundle.contrast_ratio,
        config,
    );

    let cta = if bundle.cta_detected && bundle.cta_box.is_some() {
        let (area_ratio, center_dist) = cta_geometry(bundle);
        cta_visibility_score(
            true,
            area_ratio,
            center_dist,
            config.cta_saliency_proxy,
            config,
        )
    } else {
        cta_visibility_score(false, 0.0, 1.0, 0.0, config)
    };

    let branding = branding_score(bundle.logo_detected, config);

    let composite = config.attention_weight * attention
        + config.clarity_weight * clarity
        + config.cta_weight * cta
        + config.branding_weight * branding;

    let verdict = classify(composite, config);

    let scores = Scores {
        attention: round_to(attention, 1),
        clarity: round_to(clarity, 1),
        cta_visibility: round_to(cta, 1),
        branding: round_to(branding, 1),
        readability: round_to(
            config.readability_clarity_weight * clarity
                + config.readability_attention_weight * attention,
            1,
        ),
        visual_noise: round_to(100.0 * (1.0 - clamp01(bundle.visual_noise)), 1),
        composite: round_to(composite, 1),
    };

    (scores, verdict)
}

/// Maps a composite score onto the three-tier verdict. Tier lower
/// bounds are inclusive, so the mapping is monotonic in the composite.
#[must_use]
pub fn classify(composite: f64, config: &ScoringConfig) -> Verdict {
    if composite >= config.go_threshold {
        Verdict::Go
    } else if composite >= config.improve_threshold {
        Verdict::Improve
    } else {
        Verdict::Stop
    }
}
