//! Structured logging for Placefinder.
//!
//! Handles subscriber setup (console + rolling NDJSON file), secret redaction
//! and the analysis event log.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{AnalysisEvent, EventLogEntry, EventLogger};
pub use logger::init_logger;
pub use redact::redact_sensitive_data;
