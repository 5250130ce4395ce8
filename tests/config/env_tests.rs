// API key resolution from the environment

use serial_test::serial;
use std::env;
use thinkdsa_core::config::{AppConfig, resolve_api_key};

const VAR: &str = "THINKDSA_TEST_GEMINI_KEY";

fn set(value: &str) {
    // SAFETY: tests touching the environment are serialized.
    unsafe { env::set_var(VAR, value) };
}

fn clear() {
    // SAFETY: tests touching the environment are serialized.
    unsafe { env::remove_var(VAR) };
}

#[test]
#[serial]
fn resolves_trimmed_value() {
    set("  abc123  ");
    assert_eq!(resolve_api_key(VAR), Some("abc123".to_string()));
    clear();
}

#[test]
#[serial]
fn unset_variable_resolves_to_none() {
    clear();
    assert_eq!(resolve_api_key(VAR), None);
}

#[test]
#[serial]
fn blank_variable_resolves_to_none() {
    set("   ");
    assert_eq!(resolve_api_key(VAR), None);
    clear();
}

#[test]
#[serial]
fn config_uses_configured_variable_name() {
    set("from-config");
    let config = AppConfig {
        api_key_env: VAR.to_string(),
        ..AppConfig::default()
    };
    assert_eq!(config.resolve_api_key().as_deref(), Some("from-config"));
    clear();
}

#[test]
fn blank_variable_name_resolves_to_none() {
    assert_eq!(resolve_api_key("  "), None);
}
