//! Tests for the settings loader.
//!
//! Responsibilities:
//! - Test builder methods and their side effects on `load_env_config`.
//! - Test environment variable handling and precedence.
//! - Test settings file loading and dotenv handling.
//!
//! Invariants:
//! - Tests use `serial_test` to prevent environment variable pollution.
//! - Tests use `global_test_lock()` for additional synchronization.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::sync::Mutex;

pub mod basic_tests;
pub mod file_tests;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Every `CFGMERGE_*` variable set to unset, for `temp_env::with_vars`.
pub fn cleared_vars() -> Vec<(&'static str, Option<&'static str>)> {
    use crate::constants::*;

    vec![
        (ENV_ROOT_PATH, None),
        (ENV_ENV_PATH, None),
        (ENV_FILE_POST_FIX, None),
        (ENV_SEPARATOR, None),
        (ENV_ENVIRONMENT, None),
        (ENV_USE_HOSTNAME, None),
        (ENV_LOAD_ENV_CONFIG, None),
        (ENV_HOSTNAME, None),
        (ENV_TIMEOUT, None),
        (ENV_SERVER_URL, None),
    ]
}

/// `cleared_vars()` with the given overrides applied.
pub fn vars_with(
    overrides: &[(&'static str, &'static str)],
) -> Vec<(&'static str, Option<&'static str>)> {
    let mut vars = cleared_vars();
    for (key, value) in overrides {
        if let Some(slot) = vars.iter_mut().find(|(k, _)| k == key) {
            slot.1 = Some(value);
        }
    }
    vars
}
