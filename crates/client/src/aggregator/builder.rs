//! Builder for constructing [`ConfigAggregator`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for the aggregator
//! - Wiring the catalog, loader, registry and resolver together
//! - Building an [`HttpFetcher`] when no fetcher is supplied
//!
//! # What this module does NOT handle:
//! - Reading settings from the environment (see `cfgmerge_config::SettingsLoader`)
//!
//! # Invariants
//! - Every part of one aggregator shares the same catalog and settings

use std::sync::Arc;

use cfgmerge_config::AggregatorSettings;

use super::ConfigAggregator;
use crate::catalog::Catalog;
use crate::error::Result;
use crate::fetch::{Fetcher, HttpFetcher};
use crate::loader::ComponentLoader;
use crate::metrics::MetricsCollector;
use crate::registry::LoadRegistry;
use crate::resolver::BatchResolver;

/// Builder for creating a new [`ConfigAggregator`].
///
/// # Example
///
/// ```rust,ignore
/// use cfgmerge_client::ConfigAggregator;
/// use cfgmerge_config::SettingsLoader;
///
/// let settings = SettingsLoader::new()
///     .with_root_path("https://cfg.example.com/configurations/")
///     .with_environment("prod")
///     .build()?;
///
/// let aggregator = ConfigAggregator::builder().settings(settings).build()?;
/// ```
#[derive(Default)]
pub struct ConfigAggregatorBuilder {
    settings: Option<AggregatorSettings>,
    fetcher: Option<Arc<dyn Fetcher>>,
    metrics: Option<MetricsCollector>,
}

impl ConfigAggregatorBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the aggregator settings.
    ///
    /// Defaults to [`AggregatorSettings::default`].
    pub fn settings(mut self, settings: AggregatorSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Set the fetcher used for every document request.
    pub fn fetcher(mut self, fetcher: Arc<dyn Fetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Set the metrics collector.
    pub fn metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Build the [`ConfigAggregator`].
    ///
    /// # Errors
    ///
    /// Returns an error if no fetcher was given and the HTTP fetcher cannot be built.
    pub fn build(self) -> Result<ConfigAggregator> {
        let settings = self.settings.unwrap_or_default();

        let fetcher = match self.fetcher {
            Some(fetcher) => fetcher,
            None => Arc::new(HttpFetcher::builder().from_settings(&settings).build()?),
        };

        Ok(assemble(
            settings,
            fetcher,
            self.metrics.unwrap_or_default(),
        ))
    }
}

pub(super) fn assemble(
    settings: AggregatorSettings,
    fetcher: Arc<dyn Fetcher>,
    metrics: MetricsCollector,
) -> ConfigAggregator {
    let separator = settings.component_names_separator.clone();
    let settings = Arc::new(settings);
    let catalog = Catalog::new();

    let loader = ComponentLoader::new(Arc::clone(&settings), fetcher, catalog.clone())
        .with_metrics(metrics.clone());
    let registry = LoadRegistry::new(loader).with_metrics(metrics);
    let resolver = BatchResolver::new(registry, separator);

    ConfigAggregator {
        settings,
        catalog,
        resolver,
    }
}
