//! Builder method tests for the settings loader.

use std::time::Duration;

use crate::loader::builder::SettingsLoader;

#[test]
fn test_loader_defaults() {
    let settings = SettingsLoader::new().build().unwrap();
    assert_eq!(settings.root_path, "configurations/");
    assert_eq!(settings.env_path, "env/");
    assert_eq!(settings.file_post_fix, ".json");
    assert_eq!(settings.component_names_separator, ",");
    assert!(settings.load_env_config);
    assert!(!settings.use_hostname_as_environment);
    assert!(settings.environment.is_none());
}

#[test]
fn test_builder_setters() {
    let settings = SettingsLoader::new()
        .with_root_path("https://cfg.example.com/conf/")
        .with_env_path("overlays/")
        .with_file_post_fix(".cfg.json")
        .with_component_names_separator("|")
        .with_hostname("edge-01")
        .with_timeout(Duration::from_secs(5))
        .build()
        .unwrap();

    assert_eq!(settings.root_path, "https://cfg.example.com/conf/");
    assert_eq!(settings.env_path, "overlays/");
    assert_eq!(settings.file_post_fix, ".cfg.json");
    assert_eq!(settings.component_names_separator, "|");
    assert_eq!(settings.hostname.as_deref(), Some("edge-01"));
    assert_eq!(settings.timeout, Duration::from_secs(5));
}

#[test]
fn test_set_environment_forces_env_config_on() {
    let settings = SettingsLoader::new()
        .disable_environment_config()
        .with_environment("prod")
        .build()
        .unwrap();

    assert!(settings.load_env_config);
    assert_eq!(settings.environment.as_deref(), Some("prod"));
}

#[test]
fn test_use_hostname_forces_env_config_on() {
    let settings = SettingsLoader::new()
        .disable_environment_config()
        .use_hostname_as_environment()
        .build()
        .unwrap();

    assert!(settings.load_env_config);
    assert!(settings.use_hostname_as_environment);
}

#[test]
fn test_disable_after_environment_wins() {
    let settings = SettingsLoader::new()
        .with_environment("prod")
        .disable_environment_config()
        .build()
        .unwrap();

    assert!(!settings.load_env_config);
    assert_eq!(settings.environment.as_deref(), Some("prod"));
    assert!(settings.resolve_environment().is_none());
}
