//! Mock implementations of core port traits.

use std::sync::{Arc, Mutex, PoisonError};

use image::DynamicImage;
use pretest_core::domain::{CreativeImage, OcrWord, PretestReport};
use pretest_core::ports::{CreativeSource, OcrEngine, ProgressEvent, ProgressSink, ResultOutput};

/// Mock implementation of `CreativeSource` for testing.
///
/// Yields pre-built creatives and tracks iteration for assertions.
pub struct MockCreativeSource {
    creatives: Vec<CreativeImage>,
    iteration_count: Arc<Mutex<usize>>,
}

impl MockCreativeSource {
    /// Creates a new mock source with the given creatives.
    #[must_use]
    pub fn new(creatives: Vec<CreativeImage>) -> Self {
        Self {
            creatives,
            iteration_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Creates an empty mock source.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Returns the number of times the source has been iterated.
    #[must_use]
    pub fn iteration_count(&self) -> usize {
        *self
            .iteration_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl CreativeSource for MockCreativeSource {
    fn creatives(&self) -> Box<dyn Iterator<Item = anyhow::Result<CreativeImage>> + Send + '_> {
        let count = Arc::clone(&self.iteration_count);
        if let Ok(mut c) = count.lock() {
            *c += 1;
        }
        Box::new(self.creatives.iter().cloned().map(Ok))
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.creatives.len())
    }
}

/// Mock implementation of `OcrEngine` for testing.
///
/// Returns a fixed word list, or a configured error.
pub struct MockOcrEngine {
    words: Vec<OcrWord>,
    fail_with: Option<String>,
}

impl MockOcrEngine {
    /// Creates a mock engine that recognizes the given words.
    #[must_use]
    pub fn new(words: Vec<OcrWord>) -> Self {
        Self {
            words,
            fail_with: None,
        }
    }

    /// Creates a mock engine that recognizes nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Creates a mock engine that fails every recognition.
    #[must_use]
    pub fn failing(message: &str) -> Self {
        Self {
            words: vec![],
            fail_with: Some(message.to_string()),
        }
    }
}

impl OcrEngine for MockOcrEngine {
    fn recognize(&self, _image: &DynamicImage) -> anyhow::Result<Vec<OcrWord>> {
        match &self.fail_with {
            Some(message) => Err(anyhow::anyhow!("{message}")),
            None => Ok(self.words.clone()),
        }
    }
}

/// Mock implementation of `ResultOutput` for testing.
///
/// Captures reports for later assertions.
pub struct MockResultOutput {
    reports: Arc<Mutex<Vec<PretestReport>>>,
    flush_count: Arc<Mutex<usize>>,
}

impl MockResultOutput {
    /// Creates a new mock output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            reports: Arc::new(Mutex::new(Vec::new())),
            flush_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Returns all captured reports.
    #[must_use]
    pub fn reports(&self) -> Vec<PretestReport> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of times `flush()` was called.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockResultOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultOutput for MockResultOutput {
    fn write(&self, report: &PretestReport) -> anyhow::Result<()> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(report.clone());
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        if let Ok(mut c) = self.flush_count.lock() {
            *c += 1;
        }
        Ok(())
    }
}

/// Mock implementation of `ProgressSink` for testing.
///
/// Captures events for later assertions.
pub struct MockProgressSink {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl MockProgressSink {
    /// Creates a new mock sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all captured events.
    #[must_use]
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Counts captured events matching a predicate.
    pub fn count_where(&self, predicate: impl Fn(&ProgressEvent) -> bool) -> usize {
        self.events().iter().filter(|e| predicate(e)).count()
    }
}

impl Default for MockProgressSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for MockProgressSink {
    fn on_event(&self, event: ProgressEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SyntheticCreativeBuilder;

    #[test]
    fn test_mock_source_tracks_iterations() {
        let source =
            MockCreativeSource::new(vec![SyntheticCreativeBuilder::flat_gray(8, 8)]);
        assert_eq!(source.iteration_count(), 0);

        let items: Vec<_> = source.creatives().collect();
        assert_eq!(items.len(), 1);
        assert_eq!(source.iteration_count(), 1);
        assert_eq!(source.count_hint(), Some(1));
    }

    #[test]
    fn test_failing_ocr_engine() {
        let engine = MockOcrEngine::failing("boom");
        let image = DynamicImage::new_rgb8(4, 4);
        assert!(engine.recognize(&image).is_err());
    }

    #[test]
    fn test_mock_progress_sink_captures() {
        let sink = MockProgressSink::new();
        sink.on_event(ProgressEvent::Finished {
            processed: 2,
            skipped: 1,
        });

        assert_eq!(sink.events().len(), 1);
        assert_eq!(
            sink.count_where(|e| matches!(e, ProgressEvent::Finished { .. })),
            1
        );
    }
}
