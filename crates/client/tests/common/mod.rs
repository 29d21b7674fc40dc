//! Common test utilities for integration tests.
//!
//! This module provides shared helper functions and re-exports commonly used
//! types for testing the aggregator. All integration tests should use
//! these utilities to ensure consistency.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - All fixture files must be valid JSON
//!
//! # What this does NOT handle
//! - Mock server setup (use wiremock directly in tests)
//! - Test-specific assertions or test logic

use std::sync::Arc;

use serde_json::Value;

// Re-export commonly used types for test convenience
// These are used via `use common::*;` in test files
#[allow(unused_imports)]
pub use cfgmerge_client::testing::{StaticFetcher, load_fixture};
#[allow(unused_imports)]
pub use cfgmerge_client::{
    AggregatorError, AggregatorSettings, ConfigAggregator, Configuration, FetchError,
    HttpFetcher, Resolution,
};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// Settings with the default locations and `environment` set.
#[allow(dead_code)]
pub fn settings_for(environment: &str) -> AggregatorSettings {
    AggregatorSettings {
        environment: Some(environment.to_string()),
        ..Default::default()
    }
}

/// Aggregator over a [`StaticFetcher`].
#[allow(dead_code)]
pub fn static_aggregator(settings: AggregatorSettings, fetcher: &StaticFetcher) -> ConfigAggregator {
    ConfigAggregator::new(settings, Arc::new(fetcher.clone()))
}

/// Fetcher serving the `auth` and `payments` fixtures, plus the `prod` overlay for `auth`.
#[allow(dead_code)]
pub fn fixture_fetcher() -> StaticFetcher {
    StaticFetcher::new()
        .with_document(
            "configurations/auth.json",
            load_fixture("configurations/auth.json"),
        )
        .with_document(
            "configurations/payments.json",
            load_fixture("configurations/payments.json"),
        )
        .with_document(
            "configurations/env/prod/auth.json",
            load_fixture("configurations/env/prod/auth.json"),
        )
}

/// Render a configuration as a JSON value for comparisons.
#[allow(dead_code)]
pub fn as_value(config: &Configuration) -> Value {
    Value::Object(config.clone())
}
