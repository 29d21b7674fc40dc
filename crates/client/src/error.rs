//! Error types for the configuration aggregator.

use thiserror::Error;

/// Result type alias for aggregator operations.
pub type Result<T> = std::result::Result<T, AggregatorError>;

/// Failures reported by a [`Fetcher`](crate::fetch::Fetcher).
///
/// Fetch errors are cloned into every waiter of a shared load, so they carry
/// owned, printable data only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The server answered with a non-success status.
    #[error("HTTP {status} fetching {url}")]
    Status { url: String, status: u16 },

    /// The request could not be completed (connection, DNS, TLS, ...).
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// The request did not complete within the configured timeout.
    #[error("Request to {url} timed out")]
    Timeout { url: String },

    /// The URL could not be parsed or resolved.
    #[error("Invalid URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    /// The response body is not a JSON object.
    #[error("Invalid document at {url}: {message}")]
    InvalidDocument { url: String, message: String },
}

impl FetchError {
    /// HTTP status code of the failure, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// URL of the failed request.
    pub fn url(&self) -> &str {
        match self {
            Self::Status { url, .. }
            | Self::Transport { url, .. }
            | Self::Timeout { url }
            | Self::InvalidUrl { url, .. }
            | Self::InvalidDocument { url, .. } => url,
        }
    }

    /// Check if the document does not exist (HTTP 404).
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Errors that can occur while resolving component configurations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregatorError {
    /// The requested set of component names is unusable (e.g. an empty list).
    #[error("Illegal component names: {0}")]
    InvalidInput(String),

    /// A component name is empty or whitespace-only.
    #[error("Requested component {0:?} is not valid")]
    InvalidComponent(String),

    /// The base document of a component could not be fetched.
    #[error("Failed to load configuration for component '{component}': {source}")]
    FetchFailed {
        component: String,
        #[source]
        source: FetchError,
    },

    /// The environment overlay of a component could not be fetched.
    ///
    /// Never returned from a load: the load degrades to the base
    /// configuration and this error is only logged.
    #[error(
        "Failed to load environment configuration '{environment}' for component '{component}': {source}"
    )]
    EnvironmentFetchFailed {
        component: String,
        environment: String,
        #[source]
        source: FetchError,
    },

    /// A component of a multi-component request failed.
    ///
    /// Raised on the first failure, so `failed` names that component.
    #[error(
        "At least one of the requested configurations was not loaded successfully: {}",
        .failed.join(", ")
    )]
    AggregateFailure { failed: Vec<String> },

    /// The task running a component load panicked or was shut down.
    #[error("Load of component '{component}' was aborted: {message}")]
    LoadAborted { component: String, message: String },

    /// The HTTP fetcher could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

impl AggregatorError {
    /// HTTP status of the underlying fetch failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::FetchFailed { source, .. } | Self::EnvironmentFetchFailed { source, .. } => {
                source.status()
            }
            _ => None,
        }
    }

    /// Component this error is about, for single-component errors.
    pub fn component(&self) -> Option<&str> {
        match self {
            Self::InvalidComponent(component)
            | Self::FetchFailed { component, .. }
            | Self::EnvironmentFetchFailed { component, .. }
            | Self::LoadAborted { component, .. } => Some(component),
            _ => None,
        }
    }

    /// Names of the failed components of a batch request.
    pub fn failed_components(&self) -> &[String] {
        match self {
            Self::AggregateFailure { failed } => failed,
            _ => &[],
        }
    }
}
