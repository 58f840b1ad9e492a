pub mod default_analysis;
pub mod error;
pub mod traits;
pub mod types;

pub use default_analysis::DEFAULT_ANALYSIS;
pub use error::{AnalysisError, PlacefinderError};
pub use traits::ImageAnalyzer;
pub use types::{ImageUpload, UploadLimits, ACCEPTED_IMAGE_TYPES, MAX_UPLOAD_BYTES};
