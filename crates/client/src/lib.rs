//! Client-side configuration aggregation.
//!
//! This crate fetches per-component JSON configuration documents, deep-merges
//! an optional environment overlay on top of each base document, and caches
//! the result so every component is loaded at most once. Components can be
//! requested one at a time or in batches.
//!
//! ```rust,ignore
//! use cfgmerge_client::ConfigAggregator;
//! use cfgmerge_config::SettingsLoader;
//!
//! let settings = SettingsLoader::new().load_dotenv()?.from_env()?.build()?;
//! let aggregator = ConfigAggregator::from_settings(settings)?;
//!
//! let auth = aggregator.component("auth").await?;
//! let both = aggregator.get("auth, payments").await?;
//! ```

pub mod aggregator;
pub mod catalog;
pub mod error;
pub mod fetch;
pub mod loader;
pub mod merge;
pub mod metrics;
pub mod registry;
pub mod resolver;
pub mod tracing;

#[cfg(any(feature = "test-utils", test))]
pub mod testing;

/// A component configuration: a JSON object.
pub type Configuration = serde_json::Map<String, serde_json::Value>;

pub use aggregator::{ConfigAggregator, ConfigAggregatorBuilder};
pub use catalog::Catalog;
pub use error::{AggregatorError, FetchError, Result};
pub use fetch::{Fetcher, HttpFetcher, HttpFetcherBuilder};
pub use loader::ComponentLoader;
pub use metrics::{ErrorCategory, FetchStage, MetricsCollector};
pub use registry::{LoadRegistry, SharedLoad};
pub use resolver::{BatchResolver, ComponentNames, Resolution};

// Re-export config types for convenience
pub use cfgmerge_config::{AggregatorSettings, SettingsLoader};
