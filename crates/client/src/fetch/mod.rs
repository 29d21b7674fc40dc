//! Document fetching.
//!
//! The aggregation engine only needs "fetch(url) -> document or failure".
//! [`Fetcher`] is that seam; [`HttpFetcher`] is the production implementation
//! and `testing::StaticFetcher` an in-memory one.

mod http;

pub use http::{HttpFetcher, HttpFetcherBuilder};

use futures::future::BoxFuture;
use serde_json::Value;

use crate::error::FetchError;

/// Asynchronous source of configuration documents.
///
/// Implementations must be shareable across tasks: one fetcher serves every
/// component load of an aggregator.
pub trait Fetcher: Send + Sync {
    /// Fetch and parse the document at `url`.
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Value, FetchError>>;
}
