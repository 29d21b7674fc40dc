//! Environment variable parsing for settings.
//!
//! Responsibilities:
//! - Read and parse `CFGMERGE_*` environment variables.
//! - Apply environment variable values to a SettingsLoader instance.
//! - Provide helper functions for reading env vars with empty/whitespace filtering.
//!
//! Does NOT handle:
//! - Loading from settings files (see file.rs).
//! - Validating the final settings (see builder.rs).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - `CFGMERGE_LOAD_ENV_CONFIG` is applied last so an explicit `false`
//!   wins over the side effects of `CFGMERGE_ENVIRONMENT`/`CFGMERGE_USE_HOSTNAME`.
//! - Invalid boolean or numeric values return ConfigError::InvalidValue.

use std::time::Duration;

use super::builder::SettingsLoader;
use super::error::ConfigError;
use crate::constants::{
    ENV_ENV_PATH, ENV_ENVIRONMENT, ENV_FILE_POST_FIX, ENV_HOSTNAME, ENV_LOAD_ENV_CONFIG,
    ENV_ROOT_PATH, ENV_SEPARATOR, ENV_SERVER_URL, ENV_TIMEOUT, ENV_USE_HOSTNAME,
};

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_bool(var: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var: var.to_string(),
            message: "must be true or false".to_string(),
        }),
    }
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut SettingsLoader) -> Result<(), ConfigError> {
    if let Some(root_path) = env_var_or_none(ENV_ROOT_PATH) {
        loader.set_root_path(root_path);
    }
    if let Some(env_path) = env_var_or_none(ENV_ENV_PATH) {
        loader.set_env_path(env_path);
    }
    if let Some(post_fix) = env_var_or_none(ENV_FILE_POST_FIX) {
        loader.set_file_post_fix(post_fix);
    }
    if let Some(separator) = env_var_or_none(ENV_SEPARATOR) {
        loader.set_component_names_separator(separator);
    }
    if let Some(hostname) = env_var_or_none(ENV_HOSTNAME) {
        loader.set_hostname(hostname);
    }
    if let Some(server_url) = env_var_or_none(ENV_SERVER_URL) {
        loader.set_server_url(server_url);
    }
    if let Some(timeout) = env_var_or_none(ENV_TIMEOUT) {
        let secs: u64 = timeout.parse().map_err(|_| ConfigError::InvalidValue {
            var: ENV_TIMEOUT.to_string(),
            message: "must be a number".to_string(),
        })?;
        loader.set_timeout(Duration::from_secs(secs));
    }
    if let Some(environment) = env_var_or_none(ENV_ENVIRONMENT) {
        loader.set_environment(environment);
    }
    if let Some(use_hostname) = env_var_or_none(ENV_USE_HOSTNAME) {
        loader.set_use_hostname_as_environment(parse_bool(ENV_USE_HOSTNAME, &use_hostname)?);
    }
    if let Some(load_env_config) = env_var_or_none(ENV_LOAD_ENV_CONFIG) {
        loader.set_load_env_config(parse_bool(ENV_LOAD_ENV_CONFIG, &load_env_config)?);
    }

    Ok(())
}
