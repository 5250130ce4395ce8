use super::AppConfig;
use super::error::ConfigError;
use std::fs;
use std::path::Path;

/// Convert AppConfig to TOML string representation
pub fn to_raw_toml_string(config: &AppConfig) -> String {
    let escape = |value: &str| value.replace('\\', "\\\\").replace('"', "\\\"");
    let mut raw = String::from("# ThinkDSA AI configuration\n\n");

    raw.push_str("# Set to false to pause hint requests\n");
    raw.push_str(&format!("enabled = {}\n\n", config.enabled));

    raw.push_str("# Environment variable that holds the Gemini API key\n");
    raw.push_str(&format!("api_key = \"{}\"\n\n", escape(&config.api_key_env)));

    raw.push_str(&format!("endpoint = \"{}\"\n", escape(&config.endpoint)));
    raw.push_str(&format!("api_path = \"{}\"\n", escape(&config.api_path)));
    raw.push_str(&format!("model = \"{}\"\n\n", escape(&config.model)));

    raw.push_str("# Where per-problem understanding scores are kept\n");
    raw.push_str(&format!(
        "score_store = \"{}\"\n",
        escape(&config.score_store.to_string_lossy())
    ));

    raw
}

/// Write the rendered config, creating parent directories as needed
pub fn write_config(config: &AppConfig, path: &Path, force: bool) -> Result<(), ConfigError> {
    if path.exists() && !force {
        return Err(ConfigError::AlreadyExists {
            path: path.to_path_buf(),
        });
    }

    let write_err = |source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, to_raw_toml_string(config)).map_err(write_err)
}
