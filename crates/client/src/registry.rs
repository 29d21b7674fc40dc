//! Load registry: at most one load per component name.
//!
//! Responsibilities:
//! - Start a component load the first time a name is requested.
//! - Hand every later request for that name the same shared future.
//!
//! Does NOT handle:
//! - Retrying failed loads. A failed load stays failed for the lifetime
//!   of the registry.
//! - Eviction. Entries are never removed.
//!
//! Invariants:
//! - Check-then-insert happens under a single lock acquisition.
//! - Loads run on the Tokio runtime and complete even if every handle is dropped.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use tracing::trace;

use crate::Configuration;
use crate::error::{AggregatorError, Result};
use crate::loader::ComponentLoader;
use crate::metrics::MetricsCollector;

/// A component load that any number of callers can await.
pub type SharedLoad = Shared<BoxFuture<'static, Result<Arc<Configuration>>>>;

/// Maps component names to their (pending or settled) loads.
#[derive(Clone)]
pub struct LoadRegistry {
    loader: ComponentLoader,
    loads: Arc<Mutex<HashMap<String, SharedLoad>>>,
    metrics: MetricsCollector,
}

impl fmt::Debug for LoadRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadRegistry")
            .field("loader", &self.loader)
            .field("names", &self.names())
            .finish_non_exhaustive()
    }
}

impl LoadRegistry {
    /// Create an empty registry that starts loads through `loader`.
    pub fn new(loader: ComponentLoader) -> Self {
        Self {
            loader,
            loads: Arc::new(Mutex::new(HashMap::new())),
            metrics: MetricsCollector::disabled(),
        }
    }

    /// Record registry hits through `metrics`.
    pub fn with_metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = metrics;
        self
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, SharedLoad>> {
        self.loads.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the load for `component`, starting it if this is the first request.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime when the load has to be started.
    pub fn get_or_create(&self, component: &str) -> SharedLoad {
        let mut loads = self.lock();

        if let Some(existing) = loads.get(component) {
            trace!(component, "Reusing existing load");
            self.metrics.record_registry_hit();
            return existing.clone();
        }

        let name = component.to_string();
        let task = tokio::spawn(self.loader.load(component));
        let load = async move {
            match task.await {
                Ok(result) => result,
                Err(join_error) => Err(AggregatorError::LoadAborted {
                    component: name,
                    message: join_error.to_string(),
                }),
            }
        }
        .boxed()
        .shared();

        loads.insert(component.to_string(), load.clone());
        load
    }

    /// Check if a load for `component` has been requested.
    pub fn contains(&self, component: &str) -> bool {
        self.lock().contains_key(component)
    }

    /// Number of distinct components requested so far.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if no load has been requested yet.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Names of all requested components, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock().keys().cloned().collect();
        names.sort();
        names
    }
}
