//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the domain core and
//! external adapters (OCR engine, report output, progress UI).

mod ocr;
mod progress;
mod result_output;
mod source;

pub use ocr::{NullOcr, OcrEngine};
pub use progress::{ProgressEvent, ProgressSink};
pub use result_output::ResultOutput;
pub use source::CreativeSource;
