use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use placefinder_config::{defaults, PlacefinderConfig, ProviderKind};
use placefinder_core::UploadLimits;

/// Placefinder runtime configuration: the prepared config file with
/// environment overrides applied on top.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server bind address
    pub bind_address: String,
    /// HTTP server port
    pub port: u16,
    pub provider: ProviderKind,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub timeout: Duration,
    pub limits: UploadLimits,
    pub default_image: Option<PathBuf>,
    /// Log level
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl Config {
    /// Resolve against the process environment.
    pub fn from_env(file: PlacefinderConfig) -> Result<Self> {
        Self::resolve(file, &std::env::vars().collect())
    }

    /// `PLACEFINDER_PORT`, `RUST_LOG` and the provider's key variable win over the file.
    pub fn resolve(file: PlacefinderConfig, env: &HashMap<String, String>) -> Result<Self> {
        let provider = match file.provider() {
            Ok(provider) => provider,
            Err(message) => bail!(message),
        };
        let server = file.server.clone().unwrap_or_default();
        let analyzer = file.analyzer.clone().unwrap_or_default();
        let logging = file.logging.clone().unwrap_or_default();

        let port = match env.get("PLACEFINDER_PORT") {
            Some(raw) => match raw.parse() {
                Ok(port) => port,
                Err(_) => bail!("PLACEFINDER_PORT is not a valid port: {raw}"),
            },
            None => server.port.unwrap_or(defaults::DEFAULT_PORT),
        };

        let api_key = provider
            .api_key_env()
            .and_then(|var| env.get(var))
            .filter(|key| !key.is_empty())
            .cloned()
            .or(analyzer.api_key.filter(|key| !key.is_empty()));

        Ok(Self {
            bind_address: server.bind.unwrap_or_else(|| defaults::DEFAULT_BIND.to_string()),
            port,
            provider,
            api_key,
            model: analyzer.model,
            base_url: analyzer.base_url,
            timeout: Duration::from_secs(analyzer.timeout_secs.unwrap_or(defaults::DEFAULT_TIMEOUT_SECS)),
            limits: file.upload_limits(),
            default_image: file.default_image_path(),
            log_level: env
                .get("RUST_LOG")
                .cloned()
                .or(logging.level)
                .unwrap_or_else(|| defaults::DEFAULT_LOG_LEVEL.to_string()),
            log_dir: logging.dir,
        })
    }

    /// The provider's API key, or an error naming the variable to set.
    pub fn require_api_key(&self) -> Result<&str> {
        match (&self.api_key, self.provider.api_key_env()) {
            (Some(key), _) => Ok(key),
            (None, Some(var)) => bail!(
                "No API key for the '{}' analyzer. Set {var} or analyzer.apiKey in the config file.",
                self.provider
            ),
            (None, None) => Ok(""),
        }
    }
}
