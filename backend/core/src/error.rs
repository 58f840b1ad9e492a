use thiserror::Error;

/// Failures surfaced by an [`ImageAnalyzer`](crate::ImageAnalyzer).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("analysis service returned {status}: {body}")]
    Http { status: u16, body: String },

    #[error("analysis service quota exhausted: {0}")]
    Quota(String),

    #[error("analysis request failed: {0}")]
    Transport(String),

    #[error("malformed analysis response: {0}")]
    MalformedResponse(String),

    #[error("analysis service returned no text")]
    EmptyResponse,
}

impl AnalysisError {
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::Quota(_) => {
                "The analysis service is busy right now. Please try again later.".to_string()
            }
            _ => "Failed to analyze image. Please try again.".to_string(),
        }
    }
}

/// Top-level error type for Placefinder.
///
/// Every variant is handled at the UI boundary: it clears the loading
/// indicator and fills the error banner with [`PlacefinderError::user_message`].
#[derive(Debug, Error)]
pub enum PlacefinderError {
    #[error("unsupported file type: {mime}")]
    InvalidFileType { mime: String },

    #[error("file too large: {size} bytes (max {max})")]
    FileTooLarge { size: u64, max: u64 },

    #[error("failed to read image file: {0}")]
    FileReadError(String),

    #[error("failed to load default image: {0}")]
    DefaultAssetLoadError(String),

    #[error(transparent)]
    AnalysisServiceError(#[from] AnalysisError),
}

impl PlacefinderError {
    /// Short banner text shown to the visitor.
    pub fn user_message(&self) -> String {
        match self {
            PlacefinderError::InvalidFileType { .. } => "Please upload a valid image file".to_string(),
            PlacefinderError::FileTooLarge { max, .. } => {
                format!("Image size should be less than {}MB", max / (1024 * 1024))
            }
            PlacefinderError::FileReadError(_) => {
                "Failed to read the image file. Please try again.".to_string()
            }
            PlacefinderError::DefaultAssetLoadError(_) => "Failed to load default image".to_string(),
            PlacefinderError::AnalysisServiceError(e) => e.user_message(),
        }
    }

    /// Stable machine-readable discriminant, used in API error bodies and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            PlacefinderError::InvalidFileType { .. } => "invalid_file_type",
            PlacefinderError::FileTooLarge { .. } => "file_too_large",
            PlacefinderError::FileReadError(_) => "file_read_error",
            PlacefinderError::DefaultAssetLoadError(_) => "default_asset_load_error",
            PlacefinderError::AnalysisServiceError(_) => "analysis_service_error",
        }
    }
}
