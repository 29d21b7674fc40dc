//! In-memory fetcher with scripted responses.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::Value;

use crate::error::FetchError;
use crate::fetch::Fetcher;

#[derive(Debug, Default)]
struct Script {
    documents: HashMap<String, Value>,
    statuses: HashMap<String, u16>,
    latency: Option<Duration>,
    delays: HashMap<String, Duration>,
    requests: Vec<String>,
}

/// Serves documents from a URL table and records every request.
///
/// URLs with neither a document nor a status answer `404`. Clones share the
/// table and the request log.
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    script: Arc<Mutex<Script>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Serve `document` for `url`.
    pub fn with_document(self, url: impl Into<String>, document: Value) -> Self {
        let url = url.into();
        {
            let mut script = self.lock();
            script.statuses.remove(&url);
            script.documents.insert(url, document);
        }
        self
    }

    /// Fail requests for `url` with HTTP `status`.
    pub fn with_status(self, url: impl Into<String>, status: u16) -> Self {
        let url = url.into();
        {
            let mut script = self.lock();
            script.documents.remove(&url);
            script.statuses.insert(url, status);
        }
        self
    }

    /// Delay every response by `latency`.
    pub fn with_latency(self, latency: Duration) -> Self {
        self.lock().latency = Some(latency);
        self
    }

    /// Delay responses for `url` by `latency`, overriding [`Self::with_latency`].
    pub fn with_latency_for(self, url: impl Into<String>, latency: Duration) -> Self {
        self.lock().delays.insert(url.into(), latency);
        self
    }

    /// Every requested URL, in request order.
    pub fn requests(&self) -> Vec<String> {
        self.lock().requests.clone()
    }

    /// Number of requests made for `url`.
    pub fn request_count(&self, url: &str) -> usize {
        self.lock().requests.iter().filter(|r| *r == url).count()
    }

    fn respond(&self, url: &str) -> (Option<Duration>, Result<Value, FetchError>) {
        let mut script = self.lock();
        script.requests.push(url.to_string());

        let response = match (script.documents.get(url), script.statuses.get(url)) {
            (Some(document), _) => Ok(document.clone()),
            (None, Some(status)) => Err(FetchError::Status {
                url: url.to_string(),
                status: *status,
            }),
            (None, None) => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        };
        let latency = script.delays.get(url).copied().or(script.latency);
        (latency, response)
    }
}

impl Fetcher for StaticFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Value, FetchError>> {
        async move {
            let (latency, response) = self.respond(url);
            if let Some(latency) = latency {
                tokio::time::sleep(latency).await;
            }
            response
        }
        .boxed()
    }
}
