//! Configuration aggregator facade.
//!
//! [`ConfigAggregator`] owns one catalog and one load registry and is the
//! entry point for applications: request component configurations by name
//! with [`ConfigAggregator::get`] or take a snapshot of everything loaded so
//! far with [`ConfigAggregator::get_all`].
//!
//! # Submodules
//! - [`builder`]: Aggregator construction
//!
//! # Invariants
//! - Clones share the same catalog and registry.
//! - Each component is loaded at most once per aggregator.

pub mod builder;

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::{self, BoxFuture, Ready};

use cfgmerge_config::AggregatorSettings;

use crate::Configuration;
use crate::catalog::Catalog;
use crate::error::{AggregatorError, Result};
use crate::fetch::Fetcher;
use crate::registry::LoadRegistry;
use crate::resolver::{BatchResolver, ComponentNames, Resolution};

pub use builder::ConfigAggregatorBuilder;

/// Loads, merges and caches component configurations.
#[derive(Debug, Clone)]
pub struct ConfigAggregator {
    settings: Arc<AggregatorSettings>,
    catalog: Catalog,
    resolver: BatchResolver,
}

impl ConfigAggregator {
    /// Create a new aggregator builder.
    pub fn builder() -> ConfigAggregatorBuilder {
        ConfigAggregatorBuilder::new()
    }

    /// Create an aggregator fetching documents over HTTP.
    ///
    /// Document URLs are `root_path` based. A relative `root_path` (the
    /// default) is resolved against `settings.server_url`; with neither an
    /// absolute root path nor a base URL every load fails with
    /// [`FetchError::InvalidUrl`](crate::error::FetchError::InvalidUrl).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP fetcher cannot be built.
    pub fn from_settings(settings: AggregatorSettings) -> Result<Self> {
        Self::builder().settings(settings).build()
    }

    /// Create an aggregator using `fetcher` for every document request.
    pub fn new(settings: AggregatorSettings, fetcher: Arc<dyn Fetcher>) -> Self {
        builder::assemble(settings, fetcher, Default::default())
    }

    /// Resolve one or more component configurations.
    ///
    /// A single name (`"auth"`, `["auth"]`) resolves to
    /// [`Resolution::Single`]; several names (`"auth, payments"`,
    /// `["auth", "payments"]`) resolve to [`Resolution::Many`] and fail with
    /// [`AggregatorError::AggregateFailure`] as soon as one of them fails.
    ///
    /// Loads start when this is called, not when the future is first polled.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime while a component still has
    /// to be loaded.
    pub fn get(&self, names: impl Into<ComponentNames>) -> BoxFuture<'static, Result<Resolution>> {
        self.resolver.resolve(names)
    }

    /// Resolve exactly one component configuration.
    ///
    /// Unlike [`ConfigAggregator::get`], the name is never split on the separator.
    pub fn component(&self, name: &str) -> BoxFuture<'static, Result<Arc<Configuration>>> {
        let name = name.to_string();
        self.resolver
            .resolve(vec![name.clone()])
            .map(move |result| {
                result.and_then(|resolution| {
                    resolution
                        .into_single()
                        .ok_or(AggregatorError::InvalidInput(name))
                })
            })
            .boxed()
    }

    /// Every catalog entry, as an already-resolved future.
    ///
    /// Does not wait for in-flight loads.
    pub fn get_all(&self) -> Ready<BTreeMap<String, Arc<Configuration>>> {
        future::ready(self.snapshot())
    }

    /// Point-in-time copy of the catalog.
    pub fn snapshot(&self) -> BTreeMap<String, Arc<Configuration>> {
        self.catalog.snapshot()
    }

    pub fn settings(&self) -> &AggregatorSettings {
        &self.settings
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn registry(&self) -> &LoadRegistry {
        self.resolver.registry()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StaticFetcher;
    use serde_json::json;

    fn aggregator() -> ConfigAggregator {
        let fetcher = StaticFetcher::new()
            .with_document("configurations/auth.json", json!({"realm": "main"}))
            .with_document("configurations/a,b.json", json!({"odd": true}));
        ConfigAggregator::new(AggregatorSettings::default(), Arc::new(fetcher))
    }

    #[tokio::test]
    async fn test_component_does_not_split() {
        let config = aggregator().component("a,b").await.unwrap();
        assert_eq!(config.get("odd"), Some(&json!(true)));
    }

    #[tokio::test]
    async fn test_get_all_snapshot_after_load() {
        let aggregator = aggregator();
        aggregator.get("auth").await.unwrap();

        let all = aggregator.get_all().await;
        assert_eq!(all.keys().collect::<Vec<_>>(), ["auth"]);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let aggregator = aggregator();
        let clone = aggregator.clone();

        clone.get("auth").await.unwrap();

        assert!(aggregator.registry().contains("auth"));
        assert!(aggregator.catalog().contains("auth"));
    }
}
