//! Settings management for the cfgmerge configuration aggregator.
//!
//! This crate provides the [`AggregatorSettings`] type and the
//! [`SettingsLoader`] that assembles it from builder calls, environment
//! variables, `.env` files, and JSON settings files.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{ConfigError, SettingsLoader, env_var_or_none};
pub use types::{AggregatorSettings, SettingsFile};
