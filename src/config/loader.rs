//! Configuration loading from disk and environment.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use crate::config::schema::AdapterConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Port the listener binds to.
pub const ENV_HTTP_PORT: &str = "ADAPTER_HTTP_PORT";
/// Maximum concurrent requests.
pub const ENV_CONCURRENCY: &str = "ADAPTER_CONCURRENCY";
/// Request body read timeout, seconds.
pub const ENV_READ_TIMEOUT: &str = "ADAPTER_READ_TIMEOUT_SECS";
/// Response body write timeout, seconds.
pub const ENV_WRITE_TIMEOUT: &str = "ADAPTER_WRITE_TIMEOUT_SECS";
/// Maximum request body size, bytes.
pub const ENV_MAX_BODY: &str = "ADAPTER_MAX_BODY_BYTES";
/// `true`/`false` toggle for gzip compression.
pub const ENV_COMPRESSION: &str = "ADAPTER_USE_COMPRESSION";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid value `{value}` for {var}")]
    Env { var: &'static str, value: String },
    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load a TOML file, apply environment overrides, and validate.
pub fn load_config(path: &Path) -> Result<AdapterConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config: AdapterConfig = toml::from_str(&content)?;
    apply_env_overrides(&mut config, |var| std::env::var(var).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Defaults plus environment overrides, validated.
pub fn load_from_env() -> Result<AdapterConfig, ConfigError> {
    let mut config = AdapterConfig::default();
    apply_env_overrides(&mut config, |var| std::env::var(var).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Apply `ADAPTER_*` overrides read through `lookup`.
pub fn apply_env_overrides<F>(config: &mut AdapterConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(port) = parse_var::<u16, _>(&lookup, ENV_HTTP_PORT)? {
        let mut addr: SocketAddr =
            config
                .listener
                .bind_address
                .parse()
                .map_err(|_| ConfigError::Env {
                    var: ENV_HTTP_PORT,
                    value: config.listener.bind_address.clone(),
                })?;
        addr.set_port(port);
        config.listener.bind_address = addr.to_string();
    }
    if let Some(n) = parse_var(&lookup, ENV_CONCURRENCY)? {
        config.listener.max_concurrency = n;
    }
    if let Some(secs) = parse_var(&lookup, ENV_READ_TIMEOUT)? {
        config.timeouts.read_secs = secs;
    }
    if let Some(secs) = parse_var(&lookup, ENV_WRITE_TIMEOUT)? {
        config.timeouts.write_secs = secs;
    }
    if let Some(bytes) = parse_var(&lookup, ENV_MAX_BODY)? {
        config.limits.max_body_bytes = bytes;
    }
    if let Some(enabled) = parse_var(&lookup, ENV_COMPRESSION)? {
        config.compression = enabled;
    }
    Ok(())
}

fn parse_var<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Env { var, value: raw }),
    }
}
