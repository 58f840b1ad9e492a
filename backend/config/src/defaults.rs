//! Config defaults: fills every section the file leaves out.

use crate::schema::{AnalyzerConfig, LoggingConfig, PlacefinderConfig, ServerConfig, UploadsConfig};
use placefinder_core::{ACCEPTED_IMAGE_TYPES, MAX_UPLOAD_BYTES};

pub const DEFAULT_BIND: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_PROVIDER: &str = "gemini";
/// Seconds before a vision request is abandoned.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: PlacefinderConfig) -> PlacefinderConfig {
    let config = apply_server_defaults(config);
    let config = apply_analyzer_defaults(config);
    let config = apply_upload_defaults(config);
    apply_logging_defaults(config)
}

fn apply_server_defaults(mut config: PlacefinderConfig) -> PlacefinderConfig {
    let server = config.server.get_or_insert_with(ServerConfig::default);
    if server.bind.is_none() {
        server.bind = Some(DEFAULT_BIND.to_string());
    }
    if server.port.is_none() {
        server.port = Some(DEFAULT_PORT);
    }
    config
}

/// Provider and timeout only; the model stays unset so each analyzer picks its own.
fn apply_analyzer_defaults(mut config: PlacefinderConfig) -> PlacefinderConfig {
    let analyzer = config.analyzer.get_or_insert_with(AnalyzerConfig::default);
    if analyzer.provider.is_none() {
        analyzer.provider = Some(DEFAULT_PROVIDER.to_string());
    }
    if analyzer.timeout_secs.is_none() {
        analyzer.timeout_secs = Some(DEFAULT_TIMEOUT_SECS);
    }
    config
}

fn apply_upload_defaults(mut config: PlacefinderConfig) -> PlacefinderConfig {
    let uploads = config.uploads.get_or_insert_with(UploadsConfig::default);
    if uploads.max_bytes.is_none() {
        uploads.max_bytes = Some(MAX_UPLOAD_BYTES);
    }
    if uploads.accepted_types.is_none() {
        uploads.accepted_types = Some(ACCEPTED_IMAGE_TYPES.iter().map(|t| t.to_string()).collect());
    }
    config
}

fn apply_logging_defaults(mut config: PlacefinderConfig) -> PlacefinderConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    if logging.level.is_none() {
        logging.level = Some(DEFAULT_LOG_LEVEL.to_string());
    }
    config
}
