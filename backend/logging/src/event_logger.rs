//! Analysis Event Logger
//!
//! Structured events (rejected uploads, analysis runs and their outcome)
//! emitted through `tracing` under the `analysis_events` target.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::redact::redact_sensitive_data;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnalysisEvent {
    UploadRejected {
        source: String,
        kind: String,
        reason: String,
    },
    AnalysisRequested {
        source: String,
        mime_type: String,
        size: u64,
        generation: u64,
    },
    AnalysisCompleted {
        generation: u64,
        chars: usize,
        elapsed_ms: u64,
        stale: bool,
    },
    AnalysisFailed {
        generation: u64,
        error_msg: String,
        stale: bool,
    },
}

#[derive(Debug, Serialize)]
pub struct EventLogEntry {
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
    pub event: AnalysisEvent,
}

pub struct EventLogger;

impl EventLogger {
    /// Redacts free-text fields, stamps the event and hands it to the tracing system.
    pub fn log_event(session_id: &str, event: AnalysisEvent) -> EventLogEntry {
        let event = redact_event(event);
        let entry = EventLogEntry {
            session_id: session_id.into(),
            timestamp: Utc::now(),
            event,
        };

        info!(target: "analysis_events", event = ?entry, "Analysis event");
        entry
    }
}

fn redact_event(mut event: AnalysisEvent) -> AnalysisEvent {
    match &mut event {
        AnalysisEvent::UploadRejected { reason, .. } => {
            *reason = redact_sensitive_data(reason);
        }
        AnalysisEvent::AnalysisFailed { error_msg, .. } => {
            *error_msg = redact_sensitive_data(error_msg);
        }
        AnalysisEvent::AnalysisRequested { .. } | AnalysisEvent::AnalysisCompleted { .. } => {}
    }
    event
}
