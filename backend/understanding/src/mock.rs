use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use placefinder_core::{AnalysisError, ImageAnalyzer, ImageUpload, DEFAULT_ANALYSIS};

/// A mock analyzer that returns a canned answer (or failure) and counts calls.
pub struct MockAnalyzer {
    response: Result<String, AnalysisError>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl MockAnalyzer {
    pub fn new() -> Self {
        Self {
            response: Ok(DEFAULT_ANALYSIS.to_string()),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.response = Ok(response.into());
        self
    }

    pub fn with_error(mut self, error: AnalysisError) -> Self {
        self.response = Err(error);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of times `analyze` has been called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageAnalyzer for MockAnalyzer {
    fn name(&self) -> &str {
        "mock"
    }

    async fn analyze(&self, _image: &ImageUpload) -> Result<String, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.response.clone()
    }
}
