//! Test support utilities for pretest.
//!
//! Provides mocks, synthetic creative builders, and utilities for
//! testing the pretest analysis pipeline.
//!
//! # Example
//!
//! ```
//! use pretest_test_support::{MockCreativeSource, SyntheticCreativeBuilder};
//!
//! // Create synthetic test creatives
//! let focused = SyntheticCreativeBuilder::centered_blob(128, 128);
//! let empty = SyntheticCreativeBuilder::flat_gray(128, 128);
//!
//! // Create mock creative source
//! let source = MockCreativeSource::new(vec![focused, empty]);
//! ```

mod builders;
mod mocks;

pub use builders::SyntheticCreativeBuilder;
pub use mocks::{MockCreativeSource, MockOcrEngine, MockProgressSink, MockResultOutput};
