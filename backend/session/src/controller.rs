//! Drives the page state from user actions.
//!
//! The controller validates uploads, calls the analyzer and feeds every
//! outcome through the reducer. The state lock is never held across the
//! analyzer call, so a second upload can start while the first is in flight;
//! the reducer decides which completion is shown.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use placefinder_core::{ImageAnalyzer, ImageUpload, PlacefinderError, UploadLimits, DEFAULT_ANALYSIS};
use placefinder_logging::{AnalysisEvent, EventLogger};
use placefinder_media::{load_default_image, read_upload_file, validate_upload};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::state::{Action, PageState};

pub struct AnalysisController {
    session_id: String,
    analyzer: Arc<dyn ImageAnalyzer>,
    limits: UploadLimits,
    default_image: Option<PathBuf>,
    state: Mutex<PageState>,
}

impl AnalysisController {
    pub fn new(analyzer: Arc<dyn ImageAnalyzer>, limits: UploadLimits) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            analyzer,
            limits,
            default_image: None,
            state: Mutex::new(PageState::default()),
        }
    }

    /// Use a file on disk as the landing image instead of the bundled one.
    pub fn with_default_image(mut self, path: Option<PathBuf>) -> Self {
        self.default_image = path;
        self
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn analyzer_name(&self) -> &str {
        self.analyzer.name()
    }

    pub fn limits(&self) -> &UploadLimits {
        &self.limits
    }

    pub async fn snapshot(&self) -> PageState {
        self.state.lock().await.clone()
    }

    async fn dispatch(&self, action: Action) -> PageState {
        self.dispatch_all([action]).await
    }

    /// Apply several actions under one lock, so nothing can land between them.
    async fn dispatch_all(&self, actions: impl IntoIterator<Item = Action>) -> PageState {
        let mut guard = self.state.lock().await;
        let current = std::mem::take(&mut *guard);
        *guard = actions.into_iter().fold(current, PageState::apply);
        guard.clone()
    }

    /// Show the landing image with the canned analysis. The analyzer is not called.
    pub async fn load_default(&self) -> Result<PageState, PlacefinderError> {
        self.dispatch(Action::DefaultLoadStarted).await;
        match load_default_image(self.default_image.as_deref()).await {
            Ok(image) => {
                debug!(source = %image.source, size = image.size(), "Default image loaded");
                Ok(self
                    .dispatch(Action::DefaultLoaded {
                        image,
                        analysis: DEFAULT_ANALYSIS.to_string(),
                    })
                    .await)
            }
            Err(e) => {
                warn!(error = %e, "Default image unavailable");
                self.dispatch(Action::DefaultLoadFailed {
                    message: e.user_message(),
                })
                .await;
                Err(e)
            }
        }
    }

    /// Read, validate and analyze an image file.
    pub async fn upload_file(&self, path: &Path) -> Result<PageState, PlacefinderError> {
        let source = path.display().to_string();
        let image = match read_upload_file(path, &self.limits).await {
            Ok(image) => image,
            Err(e) => return Err(self.reject(&source, e).await),
        };
        self.analyze_selected(image).await
    }

    /// Validate and analyze an image received as raw bytes.
    pub async fn upload_bytes(
        &self,
        source: &str,
        mime: &str,
        bytes: impl Into<Bytes>,
    ) -> Result<PageState, PlacefinderError> {
        let image = match validate_upload(source, mime, bytes, &self.limits) {
            Ok(image) => image,
            Err(e) => return Err(self.reject(source, e).await),
        };
        self.analyze_selected(image).await
    }

    /// Re-run the analysis on the current image.
    ///
    /// Does nothing while an analysis is in flight or when no image is shown.
    pub async fn reanalyze(&self) -> Result<PageState, PlacefinderError> {
        let (image, generation) = {
            let mut guard = self.state.lock().await;
            if guard.loading {
                debug!("Re-analysis ignored while loading");
                return Ok(guard.clone());
            }
            let Some(image) = guard.image.clone() else {
                return Ok(guard.clone());
            };
            let current = std::mem::take(&mut *guard);
            *guard = current.apply(Action::AnalysisStarted);
            (image, guard.generation)
        };
        self.run_analysis(image, generation).await
    }

    async fn analyze_selected(&self, image: ImageUpload) -> Result<PageState, PlacefinderError> {
        let generation = self
            .dispatch_all([Action::ImageSelected { image: image.clone() }, Action::AnalysisStarted])
            .await
            .generation;
        self.run_analysis(image, generation).await
    }

    async fn reject(&self, source: &str, error: PlacefinderError) -> PlacefinderError {
        EventLogger::log_event(
            &self.session_id,
            AnalysisEvent::UploadRejected {
                source: source.to_string(),
                kind: error.kind().to_string(),
                reason: error.to_string(),
            },
        );
        self.dispatch(Action::UploadRejected {
            message: error.user_message(),
        })
        .await;
        error
    }

    /// Call the analyzer for a generation that has already been started.
    async fn run_analysis(&self, image: ImageUpload, generation: u64) -> Result<PageState, PlacefinderError> {
        EventLogger::log_event(
            &self.session_id,
            AnalysisEvent::AnalysisRequested {
                source: image.source.clone(),
                mime_type: image.mime_type.clone(),
                size: image.size(),
                generation,
            },
        );

        let started = Instant::now();
        let outcome = self.analyzer.analyze(&image).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match outcome {
            Ok(text) => {
                let chars = text.chars().count();
                let state = self.dispatch(Action::AnalysisSucceeded { generation, text }).await;
                let stale = !state.is_current(generation);
                EventLogger::log_event(
                    &self.session_id,
                    AnalysisEvent::AnalysisCompleted {
                        generation,
                        chars,
                        elapsed_ms,
                        stale,
                    },
                );
                info!(analyzer = self.analyzer.name(), generation, elapsed_ms, stale, "Analysis finished");
                Ok(state)
            }
            Err(e) => {
                let state = self
                    .dispatch(Action::AnalysisFailed {
                        generation,
                        message: e.user_message(),
                    })
                    .await;
                EventLogger::log_event(
                    &self.session_id,
                    AnalysisEvent::AnalysisFailed {
                        generation,
                        error_msg: e.to_string(),
                        stale: !state.is_current(generation),
                    },
                );
                Err(PlacefinderError::AnalysisServiceError(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use placefinder_core::AnalysisError;
    use placefinder_understanding::MockAnalyzer;
    use std::time::Duration;

    const MIB: usize = 1024 * 1024;

    fn controller(mock: Arc<MockAnalyzer>) -> AnalysisController {
        AnalysisController::new(mock, UploadLimits::default())
    }

    #[tokio::test]
    async fn default_load_uses_canned_analysis() {
        let mock = Arc::new(MockAnalyzer::new());
        let ctl = controller(mock.clone());
        let state = ctl.load_default().await.unwrap();
        assert_eq!(state.analysis.as_deref(), Some(DEFAULT_ANALYSIS));
        assert_eq!(state.image.as_ref().map(|i| i.mime_type.as_str()), Some("image/png"));
        assert!(!state.loading);
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn broken_default_override_sets_banner() {
        let dir = tempfile::tempdir().unwrap();
        let ctl = controller(Arc::new(MockAnalyzer::new()))
            .with_default_image(Some(dir.path().join("missing.jpg")));
        let err = ctl.load_default().await.unwrap_err();
        assert!(matches!(err, PlacefinderError::DefaultAssetLoadError(_)));
        let state = ctl.snapshot().await;
        assert_eq!(state.error.as_deref(), Some("Failed to load default image"));
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn text_upload_never_reaches_analyzer() {
        let mock = Arc::new(MockAnalyzer::new());
        let ctl = controller(mock.clone());
        let err = ctl.upload_bytes("notes.txt", "text/plain", b"hello".to_vec()).await.unwrap_err();
        assert!(matches!(err, PlacefinderError::InvalidFileType { .. }));
        assert_eq!(mock.calls(), 0);
        let state = ctl.snapshot().await;
        assert_eq!(state.error.as_deref(), Some("Please upload a valid image file"));
        assert!(!state.loading);
        assert_eq!(state.generation, 0);
    }

    #[tokio::test]
    async fn oversized_upload_never_reaches_analyzer() {
        let mock = Arc::new(MockAnalyzer::new());
        let ctl = controller(mock.clone());
        let err = ctl
            .upload_bytes("big.jpg", "image/jpeg", vec![0u8; 21 * MIB])
            .await
            .unwrap_err();
        assert!(matches!(err, PlacefinderError::FileTooLarge { .. }));
        assert_eq!(mock.calls(), 0);
        assert_eq!(
            ctl.snapshot().await.error.as_deref(),
            Some("Image size should be less than 20MB")
        );
    }

    #[tokio::test]
    async fn unreadable_file_sets_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let mock = Arc::new(MockAnalyzer::new());
        let ctl = controller(mock.clone());
        let err = ctl.upload_file(&dir.path().join("gone.png")).await.unwrap_err();
        assert!(matches!(err, PlacefinderError::FileReadError(_)));
        assert_eq!(mock.calls(), 0);
        assert_eq!(
            ctl.snapshot().await.error.as_deref(),
            Some("Failed to read the image file. Please try again.")
        );
    }

    #[tokio::test]
    async fn accepted_file_is_analyzed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bastion.png");
        std::fs::write(&path, b"\x89PNG\r\n\x1a\nbody").unwrap();

        let mock = Arc::new(MockAnalyzer::new().with_response("## Location Analysis\n\nSomewhere"));
        let ctl = controller(mock.clone());
        let state = ctl.upload_file(&path).await.unwrap();
        assert_eq!(mock.calls(), 1);
        assert_eq!(state.generation, 1);
        assert!(!state.loading);
        assert_eq!(state.blocks().len(), 3);
    }

    #[tokio::test]
    async fn analyzer_failure_fills_banner() {
        let mock = Arc::new(MockAnalyzer::new().with_error(AnalysisError::Quota("429".into())));
        let ctl = controller(mock.clone());
        ctl.load_default().await.unwrap();
        let err = ctl.upload_bytes("a.webp", "image/webp", vec![1u8; 8]).await.unwrap_err();
        assert!(matches!(err, PlacefinderError::AnalysisServiceError(AnalysisError::Quota(_))));

        let state = ctl.snapshot().await;
        assert!(!state.loading);
        assert_eq!(state.error, Some(AnalysisError::Quota(String::new()).user_message()));
        // The previous text stays on screen.
        assert_eq!(state.analysis.as_deref(), Some(DEFAULT_ANALYSIS));
    }

    #[tokio::test]
    async fn reanalyze_reruns_current_image() {
        let mock = Arc::new(MockAnalyzer::new().with_response("## Again"));
        let ctl = controller(mock.clone());
        ctl.load_default().await.unwrap();
        let state = ctl.reanalyze().await.unwrap();
        assert_eq!(mock.calls(), 1);
        assert_eq!(state.analysis.as_deref(), Some("## Again"));
    }

    #[tokio::test]
    async fn reanalyze_without_image_is_noop() {
        let mock = Arc::new(MockAnalyzer::new());
        let ctl = controller(mock.clone());
        let state = ctl.reanalyze().await.unwrap();
        assert_eq!(mock.calls(), 0);
        assert_eq!(state.generation, 0);
    }

    #[tokio::test]
    async fn reanalyze_while_loading_is_noop() {
        let mock = Arc::new(MockAnalyzer::new().with_delay(Duration::from_millis(300)));
        let ctl = Arc::new(controller(mock.clone()));

        let running = {
            let ctl = ctl.clone();
            tokio::spawn(async move { ctl.upload_bytes("a.png", "image/png", vec![1u8; 4]).await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;

        let state = ctl.reanalyze().await.unwrap();
        assert!(state.loading);
        assert_eq!(state.generation, 1);

        running.await.unwrap().unwrap();
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn concurrent_reanalyze_calls_analyzer_once() {
        let mock = Arc::new(MockAnalyzer::new().with_delay(Duration::from_millis(200)));
        let ctl = Arc::new(controller(mock.clone()));
        ctl.load_default().await.unwrap();

        // Queue both requests on the state lock so they contend for the same check.
        let held = ctl.state.lock().await;
        let first = {
            let ctl = ctl.clone();
            tokio::spawn(async move { ctl.reanalyze().await })
        };
        let second = {
            let ctl = ctl.clone();
            tokio::spawn(async move { ctl.reanalyze().await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        drop(held);

        first.await.unwrap().unwrap();
        second.await.unwrap().unwrap();
        assert_eq!(mock.calls(), 1);
        let state = ctl.snapshot().await;
        assert_eq!(state.generation, 1);
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn upload_selects_and_starts_in_one_step() {
        let mock = Arc::new(MockAnalyzer::new().with_delay(Duration::from_millis(200)));
        let ctl = Arc::new(controller(mock.clone()));

        let running = {
            let ctl = ctl.clone();
            tokio::spawn(async move { ctl.upload_bytes("mine.png", "image/png", vec![1u8; 4]).await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;

        let state = ctl.snapshot().await;
        assert!(state.user_selected);
        assert!(state.loading);
        assert_eq!(state.generation, 1);

        // A landing load finishing now must not replace the user's image.
        ctl.load_default().await.unwrap();
        running.await.unwrap().unwrap();
        let state = ctl.snapshot().await;
        assert_eq!(state.image.as_ref().map(|i| i.source.as_str()), Some("mine.png"));
        assert_ne!(state.analysis.as_deref(), Some(DEFAULT_ANALYSIS));
    }

    /// Answers with the image source, slowly for `slow.png`.
    struct BySource;

    #[async_trait]
    impl ImageAnalyzer for BySource {
        fn name(&self) -> &str {
            "by-source"
        }

        async fn analyze(&self, image: &ImageUpload) -> Result<String, AnalysisError> {
            if image.source == "slow.png" {
                tokio::time::sleep(Duration::from_millis(300)).await;
            }
            Ok(format!("## {}", image.source))
        }
    }

    #[tokio::test]
    async fn later_upload_wins_over_slow_earlier_one() {
        let ctl = Arc::new(AnalysisController::new(Arc::new(BySource), UploadLimits::default()));

        let slow = {
            let ctl = ctl.clone();
            tokio::spawn(async move { ctl.upload_bytes("slow.png", "image/png", vec![1u8; 4]).await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;

        let fast = ctl.upload_bytes("fast.png", "image/png", vec![2u8; 4]).await.unwrap();
        assert_eq!(fast.analysis.as_deref(), Some("## fast.png"));

        slow.await.unwrap().unwrap();
        let state = ctl.snapshot().await;
        assert_eq!(state.analysis.as_deref(), Some("## fast.png"));
        assert_eq!(state.image.as_ref().map(|i| i.source.as_str()), Some("fast.png"));
        assert!(!state.loading);
    }
}
