use super::CONFIG_PATH;
use super::defaults::{
    DEFAULT_API_KEY_ENV, DEFAULT_ENABLED, DEFAULT_GEMINI_API_PATH, DEFAULT_GEMINI_ENDPOINT,
    DEFAULT_MODEL, DEFAULT_SCORE_STORE,
};
use super::error::ConfigError;
use crate::constants::ENV_PATH;
use dotenvy::from_filename;
use serde::Deserialize;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::{debug, warn};

static ENV_LOADER: Once = Once::new();

/// Raw configuration structure for deserialization from TOML
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub(super) struct RawConfig {
    pub enabled: Option<bool>,
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub api_path: Option<String>,
    pub model: Option<String>,
    pub score_store: Option<String>,
}

/// Ensures environment variables are loaded from config/.env
pub fn ensure_env_loaded() {
    ENV_LOADER.call_once(|| {
        let _ = from_filename(ENV_PATH);
    });
}

/// Resolve API key from environment variable
pub fn resolve_api_key(env_var: &str) -> Option<String> {
    ensure_env_loaded();
    let raw = env_var.trim();
    if raw.is_empty() {
        return None;
    }
    match env::var(raw) {
        Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        Ok(_) => {
            warn!(env_var = raw, "API key environment variable is empty");
            None
        }
        Err(err) => {
            warn!(
                env_var = raw,
                %err,
                "API key environment variable is not set"
            );
            None
        }
    }
}

/// Load and validate configuration from a file path
///
/// An explicit path must exist. Without one, a missing default file means
/// built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<super::AppConfig, ConfigError> {
    ensure_env_loaded();
    match path {
        Some(path) => read_config(path),
        None => {
            let default_path = Path::new(CONFIG_PATH);
            if default_path.exists() {
                read_config(default_path)
            } else {
                debug!(path = CONFIG_PATH, "No configuration file, using defaults");
                validate_and_build(RawConfig::default())
            }
        }
    }
}

fn read_config(path: &Path) -> Result<super::AppConfig, ConfigError> {
    debug!(path = %path.display(), "Reading configuration file");

    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let parsed: RawConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    validate_and_build(parsed)
}

pub(super) fn validate_and_build(parsed: RawConfig) -> Result<super::AppConfig, ConfigError> {
    let endpoint = parsed
        .endpoint
        .unwrap_or_else(|| DEFAULT_GEMINI_ENDPOINT.to_string());
    if endpoint.trim().is_empty() {
        return Err(ConfigError::MissingEndpoint);
    }

    let model = parsed.model.unwrap_or_else(|| DEFAULT_MODEL.to_string());
    if model.trim().is_empty() {
        return Err(ConfigError::MissingModel);
    }

    let api_path = parsed
        .api_path
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_GEMINI_API_PATH.to_string());

    let api_key_env = parsed
        .api_key
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_API_KEY_ENV.to_string());

    let score_store = parsed
        .score_store
        .map(|raw| expand_path(&raw))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SCORE_STORE));

    Ok(super::AppConfig {
        enabled: parsed.enabled.unwrap_or(DEFAULT_ENABLED),
        api_key_env,
        endpoint: endpoint.trim().to_string(),
        api_path,
        model: model.trim().to_string(),
        score_store,
    })
}

fn expand_path(raw: &str) -> PathBuf {
    let expanded = shellexpand::full(raw)
        .map(|cow| cow.into_owned())
        .unwrap_or_else(|_| raw.to_string());
    PathBuf::from(expanded)
}
