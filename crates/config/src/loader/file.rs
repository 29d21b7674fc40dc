//! Settings file loading.
//!
//! Responsibilities:
//! - Read a JSON settings file into a partial `SettingsFile`.
//! - Apply the present fields to a SettingsLoader instance.
//!
//! Invariants:
//! - Absent fields leave the loader untouched.
//! - `load_env_config` from the file is applied after `environment` and
//!   `use_hostname_as_environment` so an explicit `false` wins.

use std::path::Path;
use std::time::Duration;

use super::builder::SettingsLoader;
use super::error::ConfigError;
use crate::types::SettingsFile;

/// Read and parse a settings file.
pub fn read_settings_file(path: &Path) -> Result<SettingsFile, ConfigError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| ConfigError::SettingsFileRead {
            path: path.to_path_buf(),
            kind: e.kind(),
        })?;

    serde_json::from_str(&content).map_err(|e| ConfigError::SettingsFileParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Apply a settings file to the loader.
pub fn apply_settings_file(loader: &mut SettingsLoader, path: &Path) -> Result<(), ConfigError> {
    let file = read_settings_file(path)?;
    tracing::debug!(path = %path.display(), "Applying settings file");
    apply_settings(loader, file);
    Ok(())
}

fn apply_settings(loader: &mut SettingsLoader, file: SettingsFile) {
    if let Some(root_path) = file.root_path {
        loader.set_root_path(root_path);
    }
    if let Some(env_path) = file.env_path {
        loader.set_env_path(env_path);
    }
    if let Some(post_fix) = file.file_post_fix {
        loader.set_file_post_fix(post_fix);
    }
    if let Some(separator) = file.component_names_separator {
        loader.set_component_names_separator(separator);
    }
    if let Some(hostname) = file.hostname {
        loader.set_hostname(hostname);
    }
    if let Some(server_url) = file.server_url {
        loader.set_server_url(server_url);
    }
    if let Some(secs) = file.timeout {
        loader.set_timeout(Duration::from_secs(secs));
    }
    if let Some(environment) = file.environment {
        loader.set_environment(environment);
    }
    if let Some(use_hostname) = file.use_hostname_as_environment {
        loader.set_use_hostname_as_environment(use_hostname);
    }
    if let Some(load_env_config) = file.load_env_config {
        loader.set_load_env_config(load_env_config);
    }
}
