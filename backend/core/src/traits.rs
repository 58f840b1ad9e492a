use async_trait::async_trait;

use crate::error::AnalysisError;
use crate::types::ImageUpload;

/// The external image-analysis collaborator: image in, markdown-subset text out.
///
/// Implementations live in `placefinder-understanding`; everything else in the
/// workspace only sees this trait, so formatting and page state can be tested
/// against synthetic responses.
#[async_trait]
pub trait ImageAnalyzer: Send + Sync {
    /// Analyzer name (e.g., "gemini", "openai", "mock").
    fn name(&self) -> &str;

    /// Describe the location shown in `image`.
    async fn analyze(&self, image: &ImageUpload) -> Result<String, AnalysisError>;
}
