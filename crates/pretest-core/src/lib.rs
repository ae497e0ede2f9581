//! Pretest Core - Domain logic and analysis pipeline
//!
//! This crate contains the core domain types, the visual analysis
//! pipeline (saliency, contrast, noise, CTA detection) and the
//! deterministic scoring engine that maps metrics to a verdict.

pub mod analysis;
pub mod domain;
pub mod ports;
pub mod scoring;

pub use analysis::{Analysis, AnalysisConfig, Analyzer};
pub use domain::{
    BoundingBox, CreativeImage, CtaCandidate, MetricsBundle, MetricsSummary, OcrWord, Placement,
    PretestReport, Scores, Verdict,
};
pub use ports::{CreativeSource, NullOcr, OcrEngine, ProgressEvent, ProgressSink, ResultOutput};
pub use scoring::{compute_scores, ScoringConfig};
