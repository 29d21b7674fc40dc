//! Metrics collection for component loads.
//!
//! This module provides counters and histograms for the aggregation engine:
//! - Component loads started
//! - Document fetch latency per stage (base / environment)
//! - Fetch failures per stage and error category
//! - Load registry hits (requests served by an existing load)
//!
//! # What this module does NOT handle:
//! - Metrics exposition/export (install a recorder such as `metrics-exporter-prometheus`)
//!
//! # Invariants
//! - All metrics use consistent label names: `stage`, `status`, `error_category`
//! - Metric recording is infallible
//! - Zero-cost when no metrics recorder is installed

use std::time::Duration;

use crate::error::FetchError;

/// Metric name for component loads started.
pub const METRIC_LOADS_TOTAL: &str = "cfgmerge_component_loads_total";

/// Metric name for document fetch duration histogram.
pub const METRIC_FETCH_DURATION: &str = "cfgmerge_fetch_duration_seconds";

/// Metric name for fetch failure counter.
pub const METRIC_FETCH_FAILURES: &str = "cfgmerge_fetch_failures_total";

/// Metric name for load registry hit counter.
pub const METRIC_REGISTRY_HITS: &str = "cfgmerge_registry_hits_total";

/// Metric name for catalog size gauge.
pub const METRIC_CATALOG_SIZE: &str = "cfgmerge_catalog_size";

/// Which document of a component load a fetch belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStage {
    /// The base document.
    Base,
    /// The environment overlay document.
    Environment,
}

impl FetchStage {
    /// Returns the string label for this stage.
    pub const fn as_str(&self) -> &'static str {
        match self {
            FetchStage::Base => "base",
            FetchStage::Environment => "environment",
        }
    }
}

/// Error categories for metrics labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Transport-level errors (connection refused, DNS, etc.)
    Transport,
    /// HTTP 4xx client errors
    Http4xx,
    /// HTTP 5xx server errors
    Http5xx,
    /// Request timeout
    Timeout,
    /// Unparseable or non-object documents and bad URLs
    Document,
    /// Unknown/unclassified errors
    Unknown,
}

impl ErrorCategory {
    /// Returns the string label for this error category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Transport => "transport",
            ErrorCategory::Http4xx => "http_4xx",
            ErrorCategory::Http5xx => "http_5xx",
            ErrorCategory::Timeout => "timeout",
            ErrorCategory::Document => "document",
            ErrorCategory::Unknown => "unknown",
        }
    }
}

impl From<&FetchError> for ErrorCategory {
    fn from(error: &FetchError) -> Self {
        match error {
            FetchError::Status { status, .. } if (400..500).contains(status) => {
                ErrorCategory::Http4xx
            }
            FetchError::Status { status, .. } if (500..600).contains(status) => {
                ErrorCategory::Http5xx
            }
            FetchError::Status { .. } => ErrorCategory::Unknown,
            FetchError::Transport { .. } => ErrorCategory::Transport,
            FetchError::Timeout { .. } => ErrorCategory::Timeout,
            FetchError::InvalidUrl { .. } | FetchError::InvalidDocument { .. } => {
                ErrorCategory::Document
            }
        }
    }
}

/// Metrics collector for the aggregation engine.
///
/// A thin wrapper around the `metrics` crate macros with consistent labels.
#[derive(Debug, Clone, Default)]
pub struct MetricsCollector {
    /// Whether metrics collection is enabled.
    enabled: bool,
}

impl MetricsCollector {
    /// Create a new, enabled metrics collector.
    pub fn new() -> Self {
        Self { enabled: true }
    }

    /// Create a disabled metrics collector.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Check if metrics collection is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record the start of a component load.
    pub fn record_load_started(&self) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_LOADS_TOTAL).increment(1);
    }

    /// Record the duration of a document fetch.
    ///
    /// `status` is `None` when the fetch failed before a response arrived.
    pub fn record_fetch_duration(&self, stage: FetchStage, duration: Duration, status: Option<u16>) {
        if !self.enabled {
            return;
        }

        let status_label = status.map_or("error".to_string(), |s| s.to_string());

        metrics::histogram!(METRIC_FETCH_DURATION,
            "stage" => stage.as_str(),
            "status" => status_label,
        )
        .record(duration.as_secs_f64());
    }

    /// Record a failed document fetch.
    pub fn record_fetch_failure(&self, stage: FetchStage, error: &FetchError) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_FETCH_FAILURES,
            "stage" => stage.as_str(),
            "error_category" => ErrorCategory::from(error).as_str(),
        )
        .increment(1);
    }

    /// Record a request served by an existing registry entry.
    pub fn record_registry_hit(&self) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_REGISTRY_HITS).increment(1);
    }

    /// Record the current number of catalog entries.
    pub fn record_catalog_size(&self, size: usize) {
        if !self.enabled {
            return;
        }

        metrics::gauge!(METRIC_CATALOG_SIZE).set(size as f64);
    }
}
