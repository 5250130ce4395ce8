use super::defaults::{
    DEFAULT_API_KEY_ENV, DEFAULT_ENABLED, DEFAULT_GEMINI_API_PATH, DEFAULT_GEMINI_ENDPOINT,
    DEFAULT_MODEL, DEFAULT_SCORE_STORE,
};
use super::error::ConfigError;
use std::path::{Path, PathBuf};

/// Application configuration loaded from thinkdsa.toml
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Mirrors the extension toggle; when false no hints are requested.
    pub enabled: bool,
    /// Name of the environment variable holding the Gemini API key.
    pub api_key_env: String,
    pub endpoint: String,
    pub api_path: String,
    pub model: String,
    pub score_store: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            enabled: DEFAULT_ENABLED,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            api_path: DEFAULT_GEMINI_API_PATH.to_string(),
            model: DEFAULT_MODEL.to_string(),
            score_store: PathBuf::from(DEFAULT_SCORE_STORE),
        }
    }
}

impl AppConfig {
    /// Load configuration from a file path (or default path if None)
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        super::loader::load_config(path)
    }

    /// Read the API key from the configured environment variable
    pub fn resolve_api_key(&self) -> Option<String> {
        super::loader::resolve_api_key(&self.api_key_env)
    }

    /// Convert configuration to TOML string
    pub fn to_raw_toml(&self) -> String {
        super::serializer::to_raw_toml_string(self)
    }

    /// Write configuration to `path`, refusing to overwrite unless `force`
    pub fn save(&self, path: &Path, force: bool) -> Result<(), ConfigError> {
        super::serializer::write_config(self, path, force)
    }
}
