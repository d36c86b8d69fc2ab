//! HTTP GET of upstream documents and images.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::error::{StorageError, StorageResult};

/// Fetch the full body of a URL.
#[async_trait]
pub trait HttpFetch: Send + Sync {
    async fn fetch(&self, url: &str) -> StorageResult<Bytes>;
}

/// reqwest-backed fetcher. Non-2xx statuses are failures.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    /// Build a client with an overall request timeout.
    pub fn new(timeout: Duration) -> StorageResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StorageError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpFetch for ReqwestFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> StorageResult<Bytes> {
        let failed = |e: reqwest::Error| StorageError::Fetch {
            url: url.to_string(),
            reason: e.to_string(),
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(failed)?
            .error_for_status()
            .map_err(failed)?;
        let body = response.bytes().await.map_err(failed)?;

        debug!(bytes = body.len(), "Fetched upstream resource");
        Ok(body)
    }
}

/// Fetcher answering from a fixed table of responses, recording every URL it
/// is asked for. URLs with no response fail.
#[derive(Debug, Default)]
pub struct ScriptedFetcher {
    responses: HashMap<String, Bytes>,
    fallback: Option<Bytes>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `url` with `body`.
    pub fn respond(mut self, url: impl Into<String>, body: impl Into<Bytes>) -> Self {
        self.responses.insert(url.into(), body.into());
        self
    }

    /// Answer every URL without an explicit response with `body`.
    pub fn respond_to_all(mut self, body: impl Into<Bytes>) -> Self {
        self.fallback = Some(body.into());
        self
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    pub fn request_count(&self) -> usize {
        self.requests().len()
    }
}

#[async_trait]
impl HttpFetch for ScriptedFetcher {
    async fn fetch(&self, url: &str) -> StorageResult<Bytes> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }
        match self.responses.get(url).or(self.fallback.as_ref()) {
            Some(body) => Ok(body.clone()),
            None => {
                warn!(url = %url, "No scripted response");
                Err(StorageError::Fetch {
                    url: url.to_string(),
                    reason: "connection refused".to_string(),
                })
            }
        }
    }
}
