//! Settings loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `SettingsLoader` mirroring the aggregator's
//!   setup-time surface (root path, env path, post-fix, environment, ...).
//! - Support loading from environment variables, settings files, and direct builder methods.
//! - Build and validate the final `AggregatorSettings`.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//! - Settings file parsing (delegated to file.rs).
//!
//! Invariants / Assumptions:
//! - Every call overrides earlier calls; later sources win.
//! - Setting an environment name or enabling hostname-as-environment forces
//!   `load_env_config` on; `disable_environment_config` turns it off until
//!   one of those is called again.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use std::path::Path;
use std::time::Duration;

use super::env::apply_env;
use super::error::ConfigError;
use super::file::apply_settings_file;
use crate::constants::MAX_TIMEOUT_SECS;
use crate::types::AggregatorSettings;

/// Loader that assembles [`AggregatorSettings`] from layered sources.
///
/// # Example
///
/// ```rust,ignore
/// use cfgmerge_config::SettingsLoader;
///
/// let settings = SettingsLoader::new()
///     .with_root_path("https://cfg.example.com/configurations/")
///     .with_environment("prod")
///     .from_env()?
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct SettingsLoader {
    settings: AggregatorSettings,
}

impl SettingsLoader {
    /// Create a new loader seeded with the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` is set to "true" or "1", the .env file is not
    /// loaded. Missing `.env` files are silently ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the `.env` file exists but has invalid syntax
    /// (`ConfigError::DotenvParse`) or cannot be read (`ConfigError::DotenvIo`).
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    /// Check if a dotenv error indicates the file was not found.
    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Apply a JSON settings file.
    ///
    /// Only the fields present in the file are applied.
    pub fn from_settings_file(mut self, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        apply_settings_file(&mut self, path.as_ref())?;
        Ok(self)
    }

    /// Read settings from `CFGMERGE_*` environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Set the prefix of every document URL.
    pub fn with_root_path(mut self, root_path: impl Into<String>) -> Self {
        self.set_root_path(root_path.into());
        self
    }

    /// Set the overlay directory below the root path.
    pub fn with_env_path(mut self, env_path: impl Into<String>) -> Self {
        self.set_env_path(env_path.into());
        self
    }

    /// Set the suffix of every document URL.
    pub fn with_file_post_fix(mut self, post_fix: impl Into<String>) -> Self {
        self.set_file_post_fix(post_fix.into());
        self
    }

    /// Set the environment name. Enables environment overlays.
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.set_environment(environment.into());
        self
    }

    /// Set the separator for delimited component name lists.
    pub fn with_component_names_separator(mut self, separator: impl Into<String>) -> Self {
        self.set_component_names_separator(separator.into());
        self
    }

    /// Use the host identifier as the environment name. Enables environment overlays.
    pub fn use_hostname_as_environment(mut self) -> Self {
        self.set_use_hostname_as_environment(true);
        self
    }

    /// Skip environment overlays entirely.
    pub fn disable_environment_config(mut self) -> Self {
        self.set_load_env_config(false);
        self
    }

    /// Set an explicit host identifier.
    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.set_hostname(hostname.into());
        self
    }

    /// Set the server URL that relative document URLs are resolved against.
    pub fn with_server_url(mut self, server_url: impl Into<String>) -> Self {
        self.set_server_url(server_url.into());
        self
    }

    /// Set the HTTP request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.set_timeout(timeout);
        self
    }

    pub(crate) fn set_root_path(&mut self, root_path: String) {
        self.settings.root_path = root_path;
    }

    pub(crate) fn set_env_path(&mut self, env_path: String) {
        self.settings.env_path = env_path;
    }

    pub(crate) fn set_file_post_fix(&mut self, post_fix: String) {
        self.settings.file_post_fix = post_fix;
    }

    pub(crate) fn set_environment(&mut self, environment: String) {
        self.settings.load_env_config = true;
        self.settings.environment = Some(environment);
    }

    pub(crate) fn set_component_names_separator(&mut self, separator: String) {
        self.settings.component_names_separator = separator;
    }

    pub(crate) fn set_use_hostname_as_environment(&mut self, enabled: bool) {
        if enabled {
            self.settings.load_env_config = true;
        }
        self.settings.use_hostname_as_environment = enabled;
    }

    pub(crate) fn set_load_env_config(&mut self, enabled: bool) {
        self.settings.load_env_config = enabled;
    }

    pub(crate) fn set_hostname(&mut self, hostname: String) {
        self.settings.hostname = Some(hostname);
    }

    pub(crate) fn set_server_url(&mut self, server_url: String) {
        self.settings.server_url = Some(server_url);
    }

    pub(crate) fn set_timeout(&mut self, timeout: Duration) {
        self.settings.timeout = timeout;
    }

    /// Current (unvalidated) settings.
    pub fn settings(&self) -> &AggregatorSettings {
        &self.settings
    }

    /// Build the final settings.
    ///
    /// # Errors
    ///
    /// - `ConfigError::InvalidValue` if the component names separator is empty.
    /// - `ConfigError::InvalidTimeout` if the timeout is zero or above the maximum.
    pub fn build(self) -> Result<AggregatorSettings, ConfigError> {
        if self.settings.component_names_separator.is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "component_names_separator".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        Self::validate_timeout(self.settings.timeout)?;

        Ok(self.settings)
    }

    /// Checks that the timeout is greater than 0 and at most `MAX_TIMEOUT_SECS`.
    fn validate_timeout(timeout: Duration) -> Result<(), ConfigError> {
        if timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout {
                message: "timeout must be greater than 0 seconds".to_string(),
            });
        }

        if timeout > Duration::from_secs(MAX_TIMEOUT_SECS) {
            return Err(ConfigError::InvalidTimeout {
                message: format!(
                    "timeout exceeds maximum allowed value of {} seconds",
                    MAX_TIMEOUT_SECS
                ),
            });
        }

        Ok(())
    }
}
