//! Progress reporting port for UI integration.

use crate::domain::PretestReport;

/// Events emitted while analyzing a batch of creatives.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Analysis started for a creative.
    Started {
        /// Path to the creative.
        path: String,
        /// Index in the batch (0-based).
        index: usize,
        /// Total creatives in the batch, if known.
        total: Option<usize>,
    },
    /// Analysis completed for a creative.
    Completed {
        /// The finished report.
        report: PretestReport,
    },
    /// A creative was skipped due to an error.
    Skipped {
        /// Path to the creative.
        path: String,
        /// Reason for skipping.
        reason: String,
    },
    /// All creatives have been processed.
    Finished {
        /// Creatives analyzed successfully.
        processed: usize,
        /// Creatives skipped.
        skipped: usize,
    },
}

/// Port for receiving progress events.
pub trait ProgressSink: Send + Sync {
    /// Called when a progress event occurs.
    fn on_event(&self, event: ProgressEvent);
}
