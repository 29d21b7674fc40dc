//! Testing utilities for aggregator tests.
//!
//! Provides fixture loading and [`StaticFetcher`], an in-memory
//! [`Fetcher`](crate::fetch::Fetcher). Available when running tests or when
//! the `test-utils` feature is enabled.
//!
//! # Example
//! ```ignore
//! use cfgmerge_client::testing::{StaticFetcher, load_fixture};
//!
//! let fetcher = StaticFetcher::new()
//!     .with_document("configurations/auth.json", load_fixture("configurations/auth.json"))
//!     .with_status("configurations/env/prod/auth.json", 404);
//! ```

mod static_fetcher;

pub use static_fetcher::StaticFetcher;

use std::path::Path;

/// Load a JSON fixture file from the fixtures directory.
///
/// # Arguments
/// * `fixture_path` - Relative path within the fixtures directory (e.g., "configurations/auth.json")
///
/// # Panics
/// - If the fixture file cannot be read
/// - If the file content is not valid JSON
pub fn load_fixture(fixture_path: &str) -> serde_json::Value {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let fixture_dir = manifest_dir.join("fixtures");
    let full_path = fixture_dir.join(fixture_path);
    let content = std::fs::read_to_string(&full_path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", full_path.display()));
    serde_json::from_str(&content).expect("Invalid JSON in fixture")
}
