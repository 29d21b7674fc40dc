//! Tracing subscriber setup for binaries embedding the aggregator.
//!
//! The library itself only emits `tracing` events; this module installs a
//! global subscriber for applications that do not bring their own.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cfgmerge_client::tracing::LoggingConfig;
//!
//! LoggingConfig::new()
//!     .with_default_directive("cfgmerge_client=debug")
//!     .with_json(true)
//!     .init()?;
//! ```

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Configuration for the global tracing subscriber.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset or invalid.
    pub default_directive: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
    /// Include the event target (module path) in each line.
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default_directive: "info".to_string(),
            json: false,
            with_target: true,
        }
    }
}

impl LoggingConfig {
    /// Create a new config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the fallback filter directive.
    pub fn with_default_directive(mut self, directive: impl Into<String>) -> Self {
        self.default_directive = directive.into();
        self
    }

    /// Builder method to toggle JSON output.
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Builder method to toggle event targets.
    pub fn with_target(mut self, with_target: bool) -> Self {
        self.with_target = with_target;
        self
    }

    /// Filter from `RUST_LOG`, falling back to the default directive.
    pub fn env_filter(&self) -> Result<EnvFilter, LoggingError> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => EnvFilter::try_new(&self.default_directive)
                .map_err(|e| LoggingError::InvalidDirective(e.to_string())),
        }
    }

    /// Install the global subscriber.
    ///
    /// # Errors
    /// Returns an error if the default directive cannot be parsed or a
    /// global subscriber is already set.
    pub fn init(&self) -> Result<(), LoggingError> {
        use tracing_subscriber::fmt;

        let env_filter = self.env_filter()?;
        let registry = tracing_subscriber::registry().with(env_filter);

        let result = if self.json {
            registry
                .with(fmt::layer().json().with_target(self.with_target))
                .try_init()
        } else {
            registry
                .with(fmt::layer().with_target(self.with_target))
                .try_init()
        };

        result.map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))
    }
}

/// Errors that can occur during subscriber initialization.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Invalid log filter directive: {0}")]
    InvalidDirective(String),
    #[error("Failed to install tracing subscriber: {0}")]
    AlreadyInitialized(String),
}
