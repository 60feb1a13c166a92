//! Configuration loading: defaults, optional TOML file, environment overrides.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::env::{parse_with, process_env, resolve_with};
use crate::config::schema::{GatewayConfig, HealthFormat, LogFormat};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value `{value}` for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("invalid upstream URL `{url}` for `{name}`: {reason}")]
    InvalidUpstream {
        name: String,
        url: String,
        reason: String,
    },

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from the optional file and the process environment.
pub fn load_config(path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    load_config_with(path, process_env)
}

/// Load configuration using `lookup` in place of the process environment.
pub fn load_config_with<F>(path: Option<&Path>, lookup: F) -> Result<GatewayConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            parse_toml(&content)?
        }
        None => GatewayConfig::default(),
    };

    apply_env(&mut config, &lookup)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Parse a TOML document. Missing sections take their defaults.
pub fn parse_toml(content: &str) -> Result<GatewayConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Overlay environment variables on top of file or default values.
pub fn apply_env<F>(config: &mut GatewayConfig, lookup: &F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    for route in &mut config.routes {
        if let Some(key) = &route.upstream_env {
            route.upstream = resolve_with(lookup, key, &route.upstream);
        }
    }
    if let Some(key) = &config.fallback.upstream_env {
        config.fallback.upstream = resolve_with(lookup, key, &config.fallback.upstream);
    }

    config.listener.port = parse_with(lookup, "PORT", config.listener.port)?;
    config.health.service = resolve_with(lookup, "GATEWAY_NAME", &config.health.service);
    config.health.format = parse_with::<_, HealthFormat>(lookup, "HEALTH_FORMAT", config.health.format)?;
    config.timeouts.connect_secs = parse_with(lookup, "CONNECT_TIMEOUT_SECS", config.timeouts.connect_secs)?;
    config.timeouts.upstream_secs = parse_with(lookup, "UPSTREAM_TIMEOUT_SECS", config.timeouts.upstream_secs)?;
    config.observability.log_level = resolve_with(lookup, "LOG_LEVEL", &config.observability.log_level);
    config.observability.log_format =
        parse_with::<_, LogFormat>(lookup, "LOG_FORMAT", config.observability.log_format)?;

    Ok(())
}
