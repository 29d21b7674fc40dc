//! Per-component load: base document, then optional environment overlay.
//!
//! Responsibilities:
//! - Validate component names.
//! - Fetch the base document and merge it into the catalog entry.
//! - Resolve the environment name and merge the overlay document on top.
//!
//! Does NOT handle:
//! - Deduplicating loads of the same component (see `registry.rs`).
//! - Combining several components (see `resolver.rs`).
//!
//! Invariants:
//! - The base fetch completes before the overlay fetch begins.
//! - A load fails if and only if its base fetch fails.
//! - Overlay failures and unresolvable environments degrade to the base
//!   configuration with a warning.
//! - The resolved value is the catalog entry itself.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use futures::FutureExt;
use futures::future::{self, BoxFuture};
use serde_json::Value;
use tracing::{debug, error, warn};

use cfgmerge_config::AggregatorSettings;

use crate::Configuration;
use crate::catalog::Catalog;
use crate::error::{AggregatorError, FetchError, Result};
use crate::fetch::Fetcher;
use crate::metrics::{FetchStage, MetricsCollector};

/// Loads one component configuration into the catalog.
#[derive(Clone)]
pub struct ComponentLoader {
    settings: Arc<AggregatorSettings>,
    fetcher: Arc<dyn Fetcher>,
    catalog: Catalog,
    metrics: MetricsCollector,
}

impl fmt::Debug for ComponentLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentLoader")
            .field("settings", &self.settings)
            .field("catalog", &self.catalog)
            .finish_non_exhaustive()
    }
}

impl ComponentLoader {
    /// Create a loader writing into `catalog`.
    pub fn new(
        settings: Arc<AggregatorSettings>,
        fetcher: Arc<dyn Fetcher>,
        catalog: Catalog,
    ) -> Self {
        Self {
            settings,
            fetcher,
            catalog,
            metrics: MetricsCollector::disabled(),
        }
    }

    /// Record load and fetch metrics through `metrics`.
    pub fn with_metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = metrics;
        self
    }

    /// Settings used to build document URLs.
    pub fn settings(&self) -> &AggregatorSettings {
        &self.settings
    }

    /// Catalog the loader writes into.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Start loading `component`.
    ///
    /// Invalid (empty) names fail without touching the catalog. For valid
    /// names the catalog entry exists by the time this returns; the
    /// fetches happen when the returned future is polled.
    pub fn load(&self, component: &str) -> BoxFuture<'static, Result<Arc<Configuration>>> {
        if component.trim().is_empty() {
            error!(component, "Invalid component configuration requested");
            return future::ready(Err(AggregatorError::InvalidComponent(
                component.to_string(),
            )))
            .boxed();
        }

        self.catalog.ensure_entry(component);
        self.metrics.record_load_started();
        self.metrics.record_catalog_size(self.catalog.len());

        self.clone().run(component.to_string()).boxed()
    }

    async fn run(self, component: String) -> Result<Arc<Configuration>> {
        let base_url = self.settings.base_url(&component);
        debug!(component = %component, url = %base_url, "Loading base configuration");

        let base = self
            .fetch_document(FetchStage::Base, &base_url)
            .await
            .map_err(|source| {
                error!(
                    component = %component,
                    status = ?source.status(),
                    error = %source,
                    "Failed to load configuration for component"
                );
                AggregatorError::FetchFailed {
                    component: component.clone(),
                    source,
                }
            })?;
        self.catalog.merge_document(&component, base);

        if !self.settings.load_env_config {
            return Ok(self.catalog.ensure_entry(&component));
        }

        let Some(environment) = self.settings.resolve_environment() else {
            warn!(component = %component, "No environment configured");
            return Ok(self.catalog.ensure_entry(&component));
        };

        let overlay_url = self.settings.environment_url(&environment, &component);
        debug!(
            component = %component,
            environment = %environment,
            url = %overlay_url,
            "Loading environment configuration"
        );

        match self
            .fetch_document(FetchStage::Environment, &overlay_url)
            .await
        {
            Ok(overlay) => self.catalog.merge_document(&component, overlay),
            Err(source) => {
                let status = source.status();
                let err = AggregatorError::EnvironmentFetchFailed {
                    component: component.clone(),
                    environment,
                    source,
                };
                warn!(error = %err, "Using base configuration only");
                debug!(component = %component, status = ?status, "Environment fetch status");
            }
        }

        Ok(self.catalog.ensure_entry(&component))
    }

    /// Fetch `url` and require the document to be a JSON object.
    async fn fetch_document(
        &self,
        stage: FetchStage,
        url: &str,
    ) -> std::result::Result<Configuration, FetchError> {
        let started = Instant::now();
        let result = self.fetcher.fetch(url).await.and_then(|document| match document {
            Value::Object(map) => Ok(map),
            other => Err(FetchError::InvalidDocument {
                url: url.to_string(),
                message: format!("expected a JSON object, found {}", json_kind(&other)),
            }),
        });

        let status = match &result {
            Ok(_) => Some(200),
            Err(err) => err.status(),
        };
        self.metrics
            .record_fetch_duration(stage, started.elapsed(), status);
        if let Err(err) = &result {
            self.metrics.record_fetch_failure(stage, err);
        }

        result
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
