//! Catalog of merged component configurations.
//!
//! Purpose: Hold the merged configuration of every component whose load has begun.
//! Responsibilities: Create entries when loads begin, merge fetched documents into
//! them, and hand out shared snapshots.
//! Non-scope: Fetching, load deduplication (see `registry.rs`), persistence.
//!
//! # Invariants
//! - An entry is created (empty) when a load for its component begins and is never removed.
//! - Entries only change through [`Catalog::merge_document`] during a load.
//! - The value a load resolves with is the catalog's own `Arc`, so every caller
//!   sharing a component name observes the same object.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::trace;

use crate::Configuration;
use crate::merge::merge;

/// Shared, cheaply cloneable store of component configurations.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Arc<Mutex<HashMap<String, Arc<Configuration>>>>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<Configuration>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the entry for `component`, creating an empty one if needed.
    pub fn ensure_entry(&self, component: &str) -> Arc<Configuration> {
        let mut entries = self.lock();
        Arc::clone(entries.entry(component.to_string()).or_insert_with(|| {
            trace!(component, "Created catalog entry");
            Arc::default()
        }))
    }

    /// Merge `document` into the entry for `component` (document wins).
    ///
    /// If a snapshot still holds the previous version, the entry is copied
    /// before being modified so that snapshots never change.
    pub fn merge_document(&self, component: &str, document: Configuration) {
        let mut entries = self.lock();
        let entry = entries.entry(component.to_string()).or_default();
        merge(Arc::make_mut(entry), document);
    }

    /// Current entry for `component`, if a load for it has begun.
    pub fn get(&self, component: &str) -> Option<Arc<Configuration>> {
        self.lock().get(component).cloned()
    }

    /// Check if a load for `component` has begun.
    pub fn contains(&self, component: &str) -> bool {
        self.lock().contains_key(component)
    }

    /// Point-in-time copy of every entry, sorted by component name.
    ///
    /// Does not wait for in-flight loads; their entries may be empty or
    /// hold only the base document.
    pub fn snapshot(&self) -> BTreeMap<String, Arc<Configuration>> {
        self.lock()
            .iter()
            .map(|(name, config)| (name.clone(), Arc::clone(config)))
            .collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn object(value: Value) -> Configuration {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_ensure_entry_creates_empty_entry_once() {
        let catalog = Catalog::new();
        assert!(catalog.is_empty());

        let first = catalog.ensure_entry("auth");
        let second = catalog.ensure_entry("auth");
        assert!(first.is_empty());
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains("auth"));
    }

    #[test]
    fn test_merge_document_accumulates() {
        let catalog = Catalog::new();
        catalog.merge_document("auth", object(json!({"a": {"x": 1, "y": 2}})));
        catalog.merge_document("auth", object(json!({"a": {"y": 3}})));

        let entry = catalog.get("auth").unwrap();
        assert_eq!(Value::Object((*entry).clone()), json!({"a": {"x": 1, "y": 3}}));
    }

    #[test]
    fn test_snapshot_is_not_affected_by_later_merges() {
        let catalog = Catalog::new();
        catalog.merge_document("auth", object(json!({"level": "base"})));

        let snapshot = catalog.snapshot();
        catalog.merge_document("auth", object(json!({"level": "overlay"})));

        assert_eq!(snapshot["auth"].get("level"), Some(&json!("base")));
        assert_eq!(
            catalog.get("auth").unwrap().get("level"),
            Some(&json!("overlay"))
        );
    }

    #[test]
    fn test_clones_share_entries() {
        let catalog = Catalog::new();
        let clone = catalog.clone();
        clone.merge_document("payments", object(json!({"currency": "EUR"})));

        assert!(catalog.contains("payments"));
        assert_eq!(catalog.snapshot().keys().collect::<Vec<_>>(), ["payments"]);
    }

    #[test]
    fn test_get_missing_entry() {
        assert!(Catalog::new().get("absent").is_none());
    }
}
