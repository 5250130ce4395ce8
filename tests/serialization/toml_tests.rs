// Serialization tests - writing AppConfig back to TOML

use std::fs;
use std::path::PathBuf;
use thinkdsa_core::config::{AppConfig, ConfigError};
use tempfile::tempdir;

#[test]
fn to_raw_toml_contains_required_fields() {
    let toml = AppConfig::default().to_raw_toml();
    assert!(toml.contains("enabled = true"));
    assert!(toml.contains("api_key = \"GEMINI_API_KEY\""));
    assert!(toml.contains("model = \"gemini-1.5-flash-latest\""));
    assert!(toml.contains("score_store = \"data/scores.json\""));
}

#[test]
fn saved_config_loads_back_unchanged() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config").join("thinkdsa.toml");
    let config = AppConfig {
        enabled: false,
        model: "gemini-pro".to_string(),
        score_store: PathBuf::from("/var/lib/thinkdsa/scores.json"),
        ..AppConfig::default()
    };

    config.save(&path, false).expect("save");
    let loaded = AppConfig::load(Some(&path)).expect("load");
    assert_eq!(loaded, config);
}

#[test]
fn save_refuses_to_overwrite_without_force() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("thinkdsa.toml");
    fs::write(&path, "model = \"keep-me\"\n").expect("write");

    let result = AppConfig::default().save(&path, false);
    assert!(matches!(result, Err(ConfigError::AlreadyExists { .. })));
    assert_eq!(fs::read_to_string(&path).expect("read"), "model = \"keep-me\"\n");

    AppConfig::default().save(&path, true).expect("forced save");
    assert_eq!(
        AppConfig::load(Some(&path)).expect("load").model,
        "gemini-1.5-flash-latest"
    );
}

#[test]
fn quotes_in_values_are_escaped() {
    let config = AppConfig {
        model: "odd\"name".to_string(),
        ..AppConfig::default()
    };
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("thinkdsa.toml");
    config.save(&path, false).expect("save");

    assert_eq!(AppConfig::load(Some(&path)).expect("load").model, "odd\"name");
}
