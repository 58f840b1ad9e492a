//! `placefinder-config`: runtime configuration for Placefinder.
//!
//! Provides:
//! - Typed config schema (server, analyzer, uploads, landing page, logging)
//! - YAML loading from `~/.placefinder/config.yaml`
//! - `${ENV_VAR}` substitution
//! - Default value application and validation
//! - Redaction for display

pub mod defaults;
pub mod env;
pub mod io;
pub mod redact;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use env::{contains_env_var_reference, resolve_env_vars, resolve_env_vars_with, MissingEnvVarError};
pub use io::{config_dir, config_file_path, load_config, parse_config};
pub use redact::redact;
pub use schema::{
    AnalyzerConfig, DefaultsConfig, LoggingConfig, PlacefinderConfig, ProviderKind, ServerConfig,
    UploadsConfig,
};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Load a config file, substitute env vars, apply defaults and validate.
///
/// This is the main entry point for loading a config at runtime. Warnings are
/// returned rather than logged, since this usually runs before the logger
/// exists; pass the report to [`ValidationReport::log`] once it does.
pub async fn load_and_prepare(path: &Path) -> Result<(PlacefinderConfig, ValidationReport)> {
    let raw_config = load_config(path).await?;
    prepare_with(raw_config, &std::env::vars().collect())
}

/// The processing half of [`load_and_prepare`], with an explicit environment.
///
/// Fails with every validation error in the message; on success the report
/// holds only warnings.
pub fn prepare_with(
    raw_config: PlacefinderConfig,
    env: &HashMap<String, String>,
) -> Result<(PlacefinderConfig, ValidationReport)> {
    let value: Value =
        serde_json::to_value(&raw_config).context("Failed to serialize config for processing")?;
    let value = resolve_env_vars_with(&value, env).context("Failed to resolve env vars in config")?;
    let config: PlacefinderConfig =
        serde_json::from_value(value).context("Failed to deserialize config after processing")?;

    let config = apply_all_defaults(config);

    let report = validate(&config);
    if !report.is_valid() {
        let errors: Vec<String> = report.errors.iter().map(ToString::to_string).collect();
        bail!(errors.join("; "));
    }

    Ok((config, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn prepares_substituted_and_defaulted_config() {
        let raw = parse_config("analyzer:\n  provider: openai\n  apiKey: \"${OPENAI_API_KEY}\"\n").unwrap();
        let (cfg, report) = prepare_with(raw, &env(&[("OPENAI_API_KEY", "sk-live")])).unwrap();
        assert!(report.warnings.is_empty());
        let analyzer = cfg.analyzer.as_ref().unwrap();
        assert_eq!(analyzer.api_key.as_deref(), Some("sk-live"));
        assert_eq!(cfg.server.as_ref().unwrap().port, Some(defaults::DEFAULT_PORT));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let raw = parse_config("uploads:\n  maxBytes: 0\n").unwrap();
        let err = prepare_with(raw, &HashMap::new()).unwrap_err();
        assert!(err.to_string().contains("uploads.maxBytes"));
    }

    #[test]
    fn every_error_is_in_the_message() {
        let raw = parse_config("uploads:\n  maxBytes: 0\nserver:\n  port: 0\n").unwrap();
        let err = prepare_with(raw, &HashMap::new()).unwrap_err().to_string();
        assert!(err.contains("uploads.maxBytes"));
        assert!(err.contains("server.port"));
    }

    #[test]
    fn warnings_are_returned_for_later_logging() {
        let raw = parse_config("analyzer:\n  provider: gemini\n").unwrap();
        let (_, report) = prepare_with(raw, &HashMap::new()).unwrap();
        assert!(report.is_valid());
        assert!(report.warnings.iter().any(|w| w.path == "analyzer.apiKey"));
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn report_log_reaches_installed_subscriber() {
        let raw = parse_config("analyzer:\n  provider: gemini\n").unwrap();
        let (_, report) = prepare_with(raw, &HashMap::new()).unwrap();

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || report.log());

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Config warning"));
        assert!(output.contains("analyzer.apiKey"));
    }

    #[test]
    fn missing_reference_is_rejected() {
        let raw = parse_config("analyzer:\n  apiKey: \"${NOT_SET_ANYWHERE}\"\n").unwrap();
        assert!(prepare_with(raw, &HashMap::new()).is_err());
    }

    #[tokio::test]
    async fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_file_path(dir.path());
        std::fs::write(&path, "analyzer:\n  provider: mock\nserver:\n  port: 8081\n").unwrap();
        let (cfg, _) = load_and_prepare(&path).await.unwrap();
        assert_eq!(cfg.provider().unwrap(), ProviderKind::Mock);
        assert_eq!(cfg.server.unwrap().port, Some(8081));
    }
}
