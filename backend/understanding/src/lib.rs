pub mod mock;
pub mod prompt;
pub mod vision;

pub use mock::MockAnalyzer;
pub use prompt::LOCATION_PROMPT;
pub use vision::{GeminiAnalyzer, OpenAiAnalyzer};
