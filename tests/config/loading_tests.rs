// Config loading tests - AppConfig::load error handling and defaults

use std::fs;
use std::path::{Path, PathBuf};
use thinkdsa_core::config::{AppConfig, ConfigError};
use tempfile::tempdir;

fn write_config(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("thinkdsa.toml");
    fs::write(&path, content).expect("Failed to write thinkdsa.toml");
    path
}

#[test]
fn returns_error_when_explicit_file_not_found() {
    let result = AppConfig::load(Some(Path::new("/nonexistent/path/thinkdsa.toml")));
    assert!(matches!(result, Err(ConfigError::NotFound { .. })));
}

#[test]
fn empty_file_yields_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = write_config(dir.path(), "");

    let config = AppConfig::load(Some(&path)).expect("load");
    assert_eq!(config, AppConfig::default());
    assert!(config.enabled);
    assert_eq!(config.model, "gemini-1.5-flash-latest");
    assert_eq!(config.api_key_env, "GEMINI_API_KEY");
}

#[test]
fn reads_every_field() {
    let dir = tempdir().expect("tempdir");
    let path = write_config(
        dir.path(),
        r#"
enabled = false
api_key = "MY_GEMINI_KEY"
endpoint = "http://127.0.0.1:9000"
api_path = "v1/models"
model = "gemini-pro"
score_store = "/tmp/thinkdsa/scores.json"
"#,
    );

    let config = AppConfig::load(Some(&path)).expect("load");
    assert!(!config.enabled);
    assert_eq!(config.api_key_env, "MY_GEMINI_KEY");
    assert_eq!(config.endpoint, "http://127.0.0.1:9000");
    assert_eq!(config.api_path, "v1/models");
    assert_eq!(config.model, "gemini-pro");
    assert_eq!(config.score_store, PathBuf::from("/tmp/thinkdsa/scores.json"));
}

#[test]
fn blank_model_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = write_config(dir.path(), "model = \"  \"\n");

    let result = AppConfig::load(Some(&path));
    assert!(matches!(result, Err(ConfigError::MissingModel)));
}

#[test]
fn blank_endpoint_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = write_config(dir.path(), "endpoint = \"\"\n");

    let result = AppConfig::load(Some(&path));
    assert!(matches!(result, Err(ConfigError::MissingEndpoint)));
}

#[test]
fn unknown_fields_are_parse_errors() {
    let dir = tempdir().expect("tempdir");
    let path = write_config(dir.path(), "temperature = 0.9\n");

    let result = AppConfig::load(Some(&path));
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
fn malformed_toml_reports_path() {
    let dir = tempdir().expect("tempdir");
    let path = write_config(dir.path(), "model = \n");

    let err = AppConfig::load(Some(&path)).expect_err("parse error");
    assert!(err.to_string().contains("thinkdsa.toml"));
}
