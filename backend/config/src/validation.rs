//! Config validation: schema checks with user-friendly error messages.

use crate::schema::PlacefinderConfig;
use thiserror::Error;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Emit every finding through `tracing`. Call once a subscriber is installed.
    pub fn log(&self) {
        for warning in &self.warnings {
            tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
        }
        for error in &self.errors {
            tracing::error!(path = %error.path, message = %error.message, "Config error");
        }
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
///
/// A missing API key is only a warning here: it may still arrive through the
/// environment, and the CLI checks again once overrides are applied.
pub fn validate(config: &PlacefinderConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_server(config, &mut report);
    validate_analyzer(config, &mut report);
    validate_uploads(config, &mut report);
    validate_logging(config, &mut report);
    report
}

fn validate_server(config: &PlacefinderConfig, report: &mut ValidationReport) {
    let Some(server) = &config.server else { return };
    if let Some(port) = server.port {
        if port == 0 {
            report.error("server.port", "port must be > 0");
        } else if port < 1024 && port != 80 && port != 443 {
            report.warn(
                "server.port",
                format!("Port {port} requires elevated privileges; consider using a port >= 1024"),
            );
        }
    }
    if let Some(bind) = &server.bind {
        if bind.trim().is_empty() {
            report.error("server.bind", "bind address cannot be empty");
        }
    }
}

fn validate_analyzer(config: &PlacefinderConfig, report: &mut ValidationReport) {
    let provider = match config.provider() {
        Ok(provider) => provider,
        Err(message) => {
            report.error("analyzer.provider", message);
            return;
        }
    };
    let Some(analyzer) = &config.analyzer else { return };

    if provider.needs_api_key() && analyzer.api_key.as_deref().map(str::is_empty).unwrap_or(true) {
        let var = provider.api_key_env().unwrap_or_default();
        report.warn(
            "analyzer.apiKey",
            format!("No API key configured for '{provider}'; set {var} or analyzer.apiKey"),
        );
    }
    if analyzer.timeout_secs == Some(0) {
        report.error("analyzer.timeoutSecs", "timeoutSecs must be >= 1");
    }
    if let Some(url) = &analyzer.base_url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            report.error("analyzer.baseUrl", format!("'{url}' is not an http(s) URL"));
        }
    }
    if analyzer.model.as_deref().is_some_and(|m| m.trim().is_empty()) {
        report.error("analyzer.model", "model cannot be empty");
    }
}

fn validate_uploads(config: &PlacefinderConfig, report: &mut ValidationReport) {
    let Some(uploads) = &config.uploads else { return };
    if uploads.max_bytes == Some(0) {
        report.error("uploads.maxBytes", "maxBytes must be > 0");
    }
    if let Some(types) = &uploads.accepted_types {
        if types.is_empty() {
            report.error("uploads.acceptedTypes", "at least one image type must be accepted");
        }
        for (i, t) in types.iter().enumerate() {
            if !t.starts_with("image/") {
                report.warn(
                    format!("uploads.acceptedTypes[{i}]"),
                    format!("'{t}' is not an image type"),
                );
            }
        }
    }
}

fn validate_logging(config: &PlacefinderConfig, report: &mut ValidationReport) {
    let Some(level) = config.logging.as_ref().and_then(|l| l.level.as_deref()) else {
        return;
    };
    if !matches!(
        level.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    ) && !level.contains('=')
    {
        report.warn("logging.level", format!("Unrecognised log level '{level}'"));
    }
}
