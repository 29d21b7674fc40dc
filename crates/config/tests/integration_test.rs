//! Integration tests for settings loading through the public API.
//!
//! These tests verify that the `SettingsLoader` builder chain produces
//! the settings the aggregator consumes.

use cfgmerge_config::{AggregatorSettings, ConfigError, SettingsLoader, env_var_or_none};
use std::time::Duration;

/// Builder values (the setup-time surface) take precedence over defaults.
#[test]
fn test_settings_loader_builder_overrides() {
    let settings = SettingsLoader::new()
        .with_root_path("https://cfg.example.com/configurations/")
        .with_environment("prod")
        .with_timeout(Duration::from_secs(10))
        .build()
        .expect("should build with builder overrides");

    assert_eq!(
        settings.base_url("auth"),
        "https://cfg.example.com/configurations/auth.json"
    );
    assert_eq!(
        settings.environment_url("prod", "auth"),
        "https://cfg.example.com/configurations/env/prod/auth.json"
    );
    assert_eq!(settings.resolve_environment().as_deref(), Some("prod"));
}

#[test]
fn test_hostname_environment_from_root_url() {
    let settings = SettingsLoader::new()
        .with_root_path("http://tenant-a.example.org/conf/")
        .use_hostname_as_environment()
        .build()
        .unwrap();

    assert_eq!(
        settings.resolve_environment().as_deref(),
        Some("tenant-a.example.org")
    );
}

#[test]
fn test_default_loader_matches_default_settings() {
    let settings = SettingsLoader::new().build().unwrap();
    assert_eq!(settings, AggregatorSettings::default());
}

#[test]
fn test_env_var_or_none_exported() {
    let _result: Option<String> = env_var_or_none("CFGMERGE_ROOT_PATH");
}

#[test]
fn test_config_error_display() {
    let err = SettingsLoader::new()
        .with_component_names_separator("")
        .build()
        .unwrap_err();

    assert!(matches!(err, ConfigError::InvalidValue { .. }));
    assert!(err.to_string().contains("component_names_separator"));
}
