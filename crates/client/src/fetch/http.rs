//! HTTP fetcher for configuration documents.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for the HTTP fetcher
//! - Resolving relative document URLs against an optional base URL
//! - Mapping HTTP outcomes onto [`FetchError`]
//!
//! # What this module does NOT handle:
//! - Retries (failed fetches are reported as-is)
//! - Merging or caching documents (see `loader.rs` and `registry.rs`)
//!
//! # Invariants
//! - Non-2xx responses become `FetchError::Status` with the response status
//! - Bodies that are not valid JSON become `FetchError::InvalidDocument`
//! - The base URL always ends with `/`, so relative paths are appended to it

use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use cfgmerge_config::AggregatorSettings;
use cfgmerge_config::constants::{DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT_SECS};

use super::Fetcher;
use crate::error::{AggregatorError, FetchError, Result};

/// Builder for creating a new [`HttpFetcher`].
///
/// # Example
///
/// ```rust,ignore
/// use cfgmerge_client::fetch::HttpFetcher;
///
/// let fetcher = HttpFetcher::builder()
///     .base_url("https://cfg.example.com/app/")
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct HttpFetcherBuilder {
    base_url: Option<String>,
    timeout: Duration,
    max_redirects: usize,
}

impl Default for HttpFetcherBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

impl HttpFetcherBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the URL that relative document URLs are resolved against.
    ///
    /// Absolute document URLs ignore it.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout.
    ///
    /// Default is 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of redirects to follow.
    pub fn max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// Take the request timeout and server URL (as base URL) from aggregator settings.
    ///
    /// A base URL already set on the builder is kept when the settings have none.
    pub fn from_settings(mut self, settings: &AggregatorSettings) -> Self {
        self.timeout = settings.timeout;
        if let Some(server_url) = &settings.server_url {
            self.base_url = Some(server_url.clone());
        }
        self
    }

    /// Ensure a base URL ends with exactly one `/`.
    ///
    /// - `"https://cfg.example.com/app"` -> `"https://cfg.example.com/app/"`
    /// - `"https://cfg.example.com//"` -> `"https://cfg.example.com/"`
    fn normalize_base_url(url: &str) -> String {
        format!("{}/", url.trim_end_matches('/'))
    }

    /// Build the [`HttpFetcher`].
    ///
    /// # Errors
    ///
    /// Returns [`AggregatorError::HttpClient`] if the base URL is not an
    /// absolute URL or the HTTP client fails to build.
    pub fn build(self) -> Result<HttpFetcher> {
        let base_url = self
            .base_url
            .as_deref()
            .map(|url| {
                let normalized = Self::normalize_base_url(url);
                Url::parse(&normalized).map_err(|e| {
                    AggregatorError::HttpClient(format!("invalid base URL {url}: {e}"))
                })
            })
            .transpose()?;

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(self.max_redirects))
            .build()
            .map_err(|e| AggregatorError::HttpClient(e.to_string()))?;

        Ok(HttpFetcher { http, base_url })
    }
}

/// Fetches configuration documents over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: reqwest::Client,
    base_url: Option<Url>,
}

impl HttpFetcher {
    /// Create a new fetcher builder.
    pub fn builder() -> HttpFetcherBuilder {
        HttpFetcherBuilder::new()
    }

    /// Base URL relative document URLs are resolved against.
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Resolve a document URL, joining relative ones onto the base URL.
    pub fn resolve_url(&self, url: &str) -> std::result::Result<Url, FetchError> {
        let invalid = |message: String| FetchError::InvalidUrl {
            url: url.to_string(),
            message,
        };

        match Url::parse(url) {
            Ok(absolute) => Ok(absolute),
            Err(url::ParseError::RelativeUrlWithoutBase) => match &self.base_url {
                Some(base) => base.join(url).map_err(|e| invalid(e.to_string())),
                None => Err(invalid(
                    "relative URL requires a base URL on the HTTP fetcher".to_string(),
                )),
            },
            Err(e) => Err(invalid(e.to_string())),
        }
    }

    /// GET the document at `url` and parse it as JSON.
    pub async fn get_document(&self, url: &str) -> std::result::Result<Value, FetchError> {
        let target = self.resolve_url(url)?;
        debug!(url = %target, "Fetching configuration document");

        let response = self
            .http
            .get(target)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| Self::transport_error(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            trace!(url, status = status.as_u16(), "Document request failed");
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Self::transport_error(url, &e))?;

        serde_json::from_slice(&body).map_err(|e| FetchError::InvalidDocument {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    fn transport_error(url: &str, error: &reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            FetchError::Transport {
                url: url.to_string(),
                message: error.to_string(),
            }
        }
    }
}

impl Fetcher for HttpFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, std::result::Result<Value, FetchError>> {
        self.get_document(url).boxed()
    }
}
