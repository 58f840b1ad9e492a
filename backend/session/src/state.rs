//! Page state reducer.
//!
//! All mutations of the displayed page go through [`PageState::apply`], so the
//! ordering rules (stale completions, default load vs. user upload) live in
//! one place and can be tested without an analyzer.

use placefinder_core::ImageUpload;
use placefinder_markdown::{format, DisplayBlock};
use serde::Serialize;

/// What the page currently shows.
#[derive(Debug, Clone, Default)]
pub struct PageState {
    pub image: Option<ImageUpload>,
    pub analysis: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
    /// Bumped by every `AnalysisStarted`; completions carry the value they started with.
    pub generation: u64,
    /// Set once the user has picked an image; the landing content never replaces it.
    pub user_selected: bool,
}

#[derive(Debug, Clone)]
pub enum Action {
    DefaultLoadStarted,
    DefaultLoaded { image: ImageUpload, analysis: String },
    DefaultLoadFailed { message: String },
    UploadRejected { message: String },
    ImageSelected { image: ImageUpload },
    AnalysisStarted,
    AnalysisSucceeded { generation: u64, text: String },
    AnalysisFailed { generation: u64, message: String },
}

impl PageState {
    pub fn apply(mut self, action: Action) -> PageState {
        match action {
            Action::DefaultLoadStarted => {
                self.loading = true;
            }
            Action::DefaultLoaded { image, analysis } => {
                // A user upload that got in first wins over the landing content.
                if self.awaiting_default() {
                    self.image = Some(image);
                    self.analysis = Some(analysis);
                    self.loading = false;
                }
            }
            Action::DefaultLoadFailed { message } => {
                if self.awaiting_default() {
                    self.error = Some(message);
                    self.loading = false;
                }
            }
            Action::UploadRejected { message } => {
                self.error = Some(message);
            }
            Action::ImageSelected { image } => {
                self.image = Some(image);
                self.error = None;
                self.user_selected = true;
            }
            Action::AnalysisStarted => {
                self.generation += 1;
                self.loading = true;
                self.error = None;
            }
            Action::AnalysisSucceeded { generation, text } => {
                if self.is_current(generation) {
                    self.analysis = Some(text);
                    self.loading = false;
                }
            }
            Action::AnalysisFailed { generation, message } => {
                if self.is_current(generation) {
                    self.error = Some(message);
                    self.loading = false;
                }
            }
        }
        self
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    fn awaiting_default(&self) -> bool {
        self.generation == 0 && !self.user_selected
    }

    /// Display blocks for the current analysis. Nothing is shown for a missing
    /// or empty analysis.
    pub fn blocks(&self) -> Vec<DisplayBlock> {
        match self.analysis.as_deref() {
            Some(text) if !text.is_empty() => format(text),
            _ => Vec::new(),
        }
    }

    pub fn view(&self) -> PageView {
        PageView {
            has_image: self.image.is_some(),
            image_source: self.image.as_ref().map(|i| i.source.clone()),
            loading: self.loading,
            error: self.error.clone(),
            generation: self.generation,
            blocks: self.blocks(),
        }
    }
}

/// Serializable snapshot of the page, without the image bytes.
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub has_image: bool,
    pub image_source: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
    pub generation: u64,
    pub blocks: Vec<DisplayBlock>,
}
