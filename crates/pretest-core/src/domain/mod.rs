//! Core domain types for creative pretest analysis.

mod creative;
mod metrics;
mod report;

pub use creative::{BoundingBox, CreativeImage, Placement};
pub use metrics::{CtaCandidate, MetricsBundle, OcrWord};
pub use report::{round_to, MetricsSummary, PretestReport, Scores, Verdict};
