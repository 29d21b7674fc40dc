//! Batch resolution of one or more component names.
//!
//! Responsibilities:
//! - Normalize the requested names (split delimited input, trim each name).
//! - Fan out to the load registry and combine the results.
//!
//! Does NOT handle:
//! - Loading components (see `loader.rs`) or deduplicating loads (see `registry.rs`).
//!
//! Invariants:
//! - A single requested name resolves to a bare configuration and fails with
//!   that load's own error.
//! - Several names resolve to a name-keyed mapping only if every load succeeds.
//! - All registry requests are made before the returned future is polled.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::{self, BoxFuture};
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use serde_json::Value;
use tracing::debug;

use crate::Configuration;
use crate::error::{AggregatorError, Result};
use crate::registry::LoadRegistry;

/// Component names as accepted by [`BatchResolver::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentNames {
    /// Names joined by the configured separator, e.g. `"auth, payments"`.
    Delimited(String),
    /// Already separated names.
    List(Vec<String>),
}

impl ComponentNames {
    /// Split and trim into individual names.
    ///
    /// An empty `separator` does not split: the whole string is one name.
    ///
    /// # Errors
    ///
    /// Returns [`AggregatorError::InvalidInput`] for an empty list.
    pub fn normalize(&self, separator: &str) -> Result<Vec<String>> {
        let names: Vec<String> = match self {
            Self::Delimited(joined) if separator.is_empty() => vec![joined.trim().to_string()],
            Self::Delimited(joined) => joined
                .split(separator)
                .map(|name| name.trim().to_string())
                .collect(),
            Self::List(names) => names.iter().map(|name| name.trim().to_string()).collect(),
        };

        if names.is_empty() {
            return Err(AggregatorError::InvalidInput(
                "no component names given".to_string(),
            ));
        }

        Ok(names)
    }
}

impl From<&str> for ComponentNames {
    fn from(names: &str) -> Self {
        Self::Delimited(names.to_string())
    }
}

impl From<String> for ComponentNames {
    fn from(names: String) -> Self {
        Self::Delimited(names)
    }
}

impl From<&String> for ComponentNames {
    fn from(names: &String) -> Self {
        Self::Delimited(names.clone())
    }
}

impl From<Vec<String>> for ComponentNames {
    fn from(names: Vec<String>) -> Self {
        Self::List(names)
    }
}

impl From<Vec<&str>> for ComponentNames {
    fn from(names: Vec<&str>) -> Self {
        Self::List(names.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for ComponentNames {
    fn from(names: &[&str]) -> Self {
        Self::List(names.iter().map(|name| name.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ComponentNames {
    fn from(names: [&str; N]) -> Self {
        Self::List(names.into_iter().map(str::to_string).collect())
    }
}

/// Result of resolving component names.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Exactly one name was requested.
    Single(Arc<Configuration>),
    /// Several names were requested, keyed by component name.
    Many(BTreeMap<String, Arc<Configuration>>),
}

impl Resolution {
    /// The configuration of a single-name request.
    pub fn as_single(&self) -> Option<&Arc<Configuration>> {
        match self {
            Self::Single(config) => Some(config),
            Self::Many(_) => None,
        }
    }

    /// The mapping of a multi-name request.
    pub fn as_many(&self) -> Option<&BTreeMap<String, Arc<Configuration>>> {
        match self {
            Self::Single(_) => None,
            Self::Many(configs) => Some(configs),
        }
    }

    /// Take the configuration of a single-name request.
    pub fn into_single(self) -> Option<Arc<Configuration>> {
        match self {
            Self::Single(config) => Some(config),
            Self::Many(_) => None,
        }
    }

    /// Take the mapping of a multi-name request.
    pub fn into_many(self) -> Option<BTreeMap<String, Arc<Configuration>>> {
        match self {
            Self::Single(_) => None,
            Self::Many(configs) => Some(configs),
        }
    }

    /// Render as JSON: the bare object for a single name, otherwise an
    /// object of component name to configuration.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Single(config) => Value::Object((**config).clone()),
            Self::Many(configs) => Value::Object(
                configs
                    .iter()
                    .map(|(name, config)| (name.clone(), Value::Object((**config).clone())))
                    .collect(),
            ),
        }
    }
}

/// Resolves name requests against a [`LoadRegistry`].
#[derive(Debug, Clone)]
pub struct BatchResolver {
    registry: LoadRegistry,
    separator: String,
}

impl BatchResolver {
    /// Create a resolver splitting delimited input on `separator`.
    pub fn new(registry: LoadRegistry, separator: impl Into<String>) -> Self {
        Self {
            registry,
            separator: separator.into(),
        }
    }

    /// Registry the resolver requests loads from.
    pub fn registry(&self) -> &LoadRegistry {
        &self.registry
    }

    /// Resolve one or more component names.
    ///
    /// Loads for every name are requested before this returns. A batch
    /// rejects as soon as its first load fails, naming that component; the
    /// other loads keep running and stay cached in the registry.
    pub fn resolve(
        &self,
        names: impl Into<ComponentNames>,
    ) -> BoxFuture<'static, Result<Resolution>> {
        let names = match names.into().normalize(&self.separator) {
            Ok(names) => names,
            Err(err) => return future::ready(Err(err)).boxed(),
        };

        if let [name] = names.as_slice() {
            return self
                .registry
                .get_or_create(name)
                .map(|result| result.map(Resolution::Single))
                .boxed();
        }

        let loads: Vec<_> = names
            .into_iter()
            .map(|name| {
                let load = self.registry.get_or_create(&name);
                (name, load)
            })
            .collect();

        async move {
            let mut pending: FuturesUnordered<_> = loads
                .into_iter()
                .map(|(name, load)| load.map(move |result| (name, result)))
                .collect();

            let mut configs = BTreeMap::new();
            while let Some((name, result)) = pending.next().await {
                match result {
                    Ok(config) => {
                        configs.insert(name, config);
                    }
                    Err(err) => {
                        debug!(component = %name, error = %err, "Component load failed");
                        return Err(AggregatorError::AggregateFailure { failed: vec![name] });
                    }
                }
            }

            Ok(Resolution::Many(configs))
        }
        .boxed()
    }
}
