//! Settings loader for builder calls, environment variables and files.
//!
//! Responsibilities:
//! - Provide a builder-pattern `SettingsLoader` for layered settings.
//! - Load `.env` files, `CFGMERGE_*` environment variables and JSON settings files.
//! - Validate and produce the final `AggregatorSettings`.
//!
//! Does NOT handle:
//! - Fetching or merging component documents (see the client crate).
//!
//! Invariants / Assumptions:
//! - Settings file values are applied before environment variables.
//! - Builder calls are applied in call order, including their side effects
//!   on `load_env_config`.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.

mod builder;
mod env;
mod error;
mod file;

pub use builder::SettingsLoader;
pub use env::env_var_or_none;
pub use error::ConfigError;

#[cfg(test)]
mod tests;
