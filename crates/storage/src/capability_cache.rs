//! Time-bounded cache of upstream capability documents.
//!
//! One document per logical server, stored as `<id>.xml` in a [`ByteStore`].
//! The store's modification time is the cache timestamp: a document younger
//! than the TTL is served as is, anything else is refetched and replaced.

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use bytes::Bytes;
use metrics::counter;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::error::StorageResult;
use crate::fetch::HttpFetch;
use crate::store::{ByteStore, StoredDocument};

/// Twelve hours.
pub const DEFAULT_TTL: Duration = Duration::from_secs(12 * 60 * 60);

/// Outcome of an invalidation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Invalidation {
    /// A cached document was deleted.
    #[serde(rename = "ok")]
    Removed,
    /// Nothing was cached.
    Absent,
}

impl Invalidation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Invalidation::Removed => "ok",
            Invalidation::Absent => "absent",
        }
    }
}

pub struct CapabilityCache {
    store: Arc<dyn ByteStore>,
    fetcher: Arc<dyn HttpFetch>,
    ttl: Duration,
}

impl CapabilityCache {
    pub fn new(store: Arc<dyn ByteStore>, fetcher: Arc<dyn HttpFetch>, ttl: Duration) -> Self {
        info!(ttl_secs = ttl.as_secs(), "Initializing capability cache");
        Self {
            store,
            fetcher,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Store key of a server's document.
    pub fn key(server_id: &str) -> String {
        format!("{}.xml", server_id)
    }

    /// True if a document written at `modified` is still fresh at `now`.
    /// A timestamp in the future counts as age zero.
    pub fn is_fresh(&self, modified: SystemTime, now: SystemTime) -> bool {
        let age = now.duration_since(modified).unwrap_or(Duration::ZERO);
        age < self.ttl
    }

    /// Capability document of `server_id`, fetched from `url` when missing
    /// or expired.
    ///
    /// A failed refresh is an error; an expired document is never served.
    #[instrument(skip(self), fields(server = %server_id))]
    pub async fn get(&self, server_id: &str, url: &str) -> StorageResult<Bytes> {
        let key = Self::key(server_id);

        if let Some(StoredDocument { bytes, modified }) = self.store.read(&key).await? {
            if self.is_fresh(modified, SystemTime::now()) {
                counter!("gpf_capabilities_cache_hits_total").increment(1);
                debug!("Capability cache hit");
                return Ok(bytes);
            }
            debug!("Capability document expired");
        }

        counter!("gpf_capabilities_cache_misses_total").increment(1);
        let bytes = self.fetcher.fetch(url).await?;
        self.store.write(&key, &bytes).await?;
        info!(url = %url, bytes = bytes.len(), "Refreshed capability document");
        Ok(bytes)
    }

    /// Drop the cached document of `server_id`.
    #[instrument(skip(self), fields(server = %server_id))]
    pub async fn invalidate(&self, server_id: &str) -> StorageResult<Invalidation> {
        let removed = self.store.delete(&Self::key(server_id)).await?;
        let outcome = if removed {
            Invalidation::Removed
        } else {
            Invalidation::Absent
        };
        info!(outcome = outcome.as_str(), "Invalidated capability document");
        Ok(outcome)
    }
}
