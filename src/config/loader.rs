//! Configuration loading from disk and environment.
//!
//! The file layer is optional: deployments that configure everything through
//! environment variables (the common case) never touch it. When
//! `RELAY_CONFIG_PATH` points at a TOML file, the file is loaded first and
//! individual environment variables override its values.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::RelayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("environment variable {var} is invalid: {message}")]
    Env { var: &'static str, message: String },

    #[error("configuration invalid: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Load and validate configuration from the process environment, plus an
/// optional TOML file named by `RELAY_CONFIG_PATH`.
pub fn load_from_env() -> Result<RelayConfig, ConfigError> {
    load_with(|var| std::env::var(var).ok())
}

/// Same as [`load_from_env`] but with an injectable variable lookup, so tests
/// never have to mutate the process environment.
pub fn load_with(get: impl Fn(&str) -> Option<String>) -> Result<RelayConfig, ConfigError> {
    let mut config = match nonempty(&get, "RELAY_CONFIG_PATH") {
        Some(path) => load_file(Path::new(&path))?,
        None => RelayConfig::default(),
    };

    apply_overrides(&mut config, &get)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Parse a TOML config file. Semantic validation happens later, after the
/// environment overlay.
pub fn load_file(path: &Path) -> Result<RelayConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Overlay environment variables onto `config`. A set-but-empty variable is
/// treated as unset.
fn apply_overrides(
    config: &mut RelayConfig,
    get: &impl Fn(&str) -> Option<String>,
) -> Result<(), ConfigError> {
    if let Some(v) = nonempty(get, "OPENAI_API_KEY") {
        config.upstream.api_key = v;
    }
    if let Some(v) = nonempty(get, "CHATKIT_WORKFLOW_ID") {
        config.upstream.workflow_id = v;
    }
    if let Some(v) = nonempty(get, "CHATKIT_API_BASE") {
        config.upstream.api_base = v;
    }
    if let Some(v) = nonempty(get, "OPENAI_PROJECT") {
        config.upstream.project = Some(v);
    }
    if let Some(v) = nonempty(get, "ALLOWED_ORIGINS") {
        config.cors.allowed_origins = parse_origins(&v);
    }
    if let Some(v) = nonempty(get, "BIND_ADDR") {
        config.listener.bind_address = v;
    }
    if let Some(v) = nonempty(get, "METRICS_ADDR") {
        config.observability.metrics_address = Some(v);
    }
    if let Some(v) = nonempty(get, "SESSION_TTL_SECS") {
        config.upstream.session_ttl_secs = Some(parse_u64("SESSION_TTL_SECS", &v)?);
    }
    if let Some(v) = nonempty(get, "UPSTREAM_TIMEOUT_SECS") {
        config.upstream.timeout_secs = parse_u64("UPSTREAM_TIMEOUT_SECS", &v)?;
    }

    Ok(())
}

fn nonempty(get: &impl Fn(&str) -> Option<String>, var: &str) -> Option<String> {
    get(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_u64(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.parse().map_err(|_| ConfigError::Env {
        var,
        message: format!("expected an integer, got '{}'", value),
    })
}

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
