//! Centralized constants for the cfgmerge workspace.
//!
//! This module contains default values used across crates to avoid
//! magic value duplication.

// =============================================================================
// Document Location Defaults
// =============================================================================

/// Default prefix prepended to every component document URL.
pub const DEFAULT_ROOT_PATH: &str = "configurations/";

/// Default directory (relative to the root path) holding environment overlays.
pub const DEFAULT_ENV_PATH: &str = "env/";

/// Default suffix appended to every component document URL.
pub const DEFAULT_FILE_POST_FIX: &str = ".json";

/// Default separator for delimited component name lists (`"auth,payments"`).
pub const DEFAULT_COMPONENT_NAMES_SEPARATOR: &str = ",";

// =============================================================================
// Fetch Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed request timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

// =============================================================================
// Environment Variable Names
// =============================================================================

pub const ENV_ROOT_PATH: &str = "CFGMERGE_ROOT_PATH";
pub const ENV_ENV_PATH: &str = "CFGMERGE_ENV_PATH";
pub const ENV_FILE_POST_FIX: &str = "CFGMERGE_FILE_POST_FIX";
pub const ENV_SEPARATOR: &str = "CFGMERGE_SEPARATOR";
pub const ENV_ENVIRONMENT: &str = "CFGMERGE_ENVIRONMENT";
pub const ENV_USE_HOSTNAME: &str = "CFGMERGE_USE_HOSTNAME";
pub const ENV_LOAD_ENV_CONFIG: &str = "CFGMERGE_LOAD_ENV_CONFIG";
pub const ENV_HOSTNAME: &str = "CFGMERGE_HOSTNAME";
pub const ENV_TIMEOUT: &str = "CFGMERGE_TIMEOUT";
pub const ENV_SERVER_URL: &str = "CFGMERGE_SERVER_URL";
