//! Settings file tests for the settings loader.

use serial_test::serial;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::{env_lock, vars_with};
use crate::constants::ENV_ROOT_PATH;
use crate::loader::builder::SettingsLoader;
use crate::loader::error::ConfigError;

/// Write a settings file into `dir` and return its path.
pub fn create_settings_file(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("cfgmerge.json");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_settings_file_applies_present_fields() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_settings_file(
        temp_dir.path(),
        r#"{ "root_path": "/srv/conf/", "environment": "prod", "timeout": 9 }"#,
    );

    let settings = SettingsLoader::new()
        .with_file_post_fix(".yaml.json")
        .from_settings_file(&path)
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(settings.root_path, "/srv/conf/");
    assert_eq!(settings.environment.as_deref(), Some("prod"));
    assert_eq!(settings.timeout.as_secs(), 9);
    // Absent in the file, keeps the earlier builder value.
    assert_eq!(settings.file_post_fix, ".yaml.json");
}

#[test]
fn test_settings_file_load_env_config_false_wins() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_settings_file(
        temp_dir.path(),
        r#"{ "environment": "prod", "load_env_config": false }"#,
    );

    let settings = SettingsLoader::new()
        .from_settings_file(&path)
        .unwrap()
        .build()
        .unwrap();

    assert!(!settings.load_env_config);
}

#[test]
#[serial]
fn test_env_overrides_settings_file() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let path = create_settings_file(temp_dir.path(), r#"{ "root_path": "/from-file/" }"#);

    temp_env::with_vars(vars_with(&[(ENV_ROOT_PATH, "/from-env/")]), || {
        let settings = SettingsLoader::new()
            .from_settings_file(&path)
            .unwrap()
            .from_env()
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(settings.root_path, "/from-env/");
    });
}

#[test]
fn test_missing_settings_file() {
    let temp_dir = TempDir::new().unwrap();
    let result = SettingsLoader::new().from_settings_file(temp_dir.path().join("absent.json"));

    assert!(matches!(
        result,
        Err(ConfigError::SettingsFileRead { kind, .. }) if kind == std::io::ErrorKind::NotFound
    ));
}

#[test]
fn test_malformed_settings_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_settings_file(temp_dir.path(), "{ not json");

    let result = SettingsLoader::new().from_settings_file(&path);
    match result {
        Err(ConfigError::SettingsFileParse { path: error_path, .. }) => {
            assert_eq!(error_path, path);
        }
        other => panic!("Expected SettingsFileParse, got {:?}", other),
    }
}

#[test]
fn test_settings_file_sets_server_url() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_settings_file(
        temp_dir.path(),
        r#"{ "server_url": "https://cfg.example.com/app/" }"#,
    );

    let settings = SettingsLoader::new()
        .from_settings_file(&path)
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(
        settings.server_url.as_deref(),
        Some("https://cfg.example.com/app/")
    );
}
