//! Application state and shared resources.

use std::sync::Arc;

use anyhow::Result;

use storage::{ByteStore, CapabilityCache, FsByteStore, HttpFetch, ReqwestFetcher};

use crate::catalog::Catalog;
use crate::config::ServiceConfig;
use crate::proxy::MapProxy;

/// Shared application state.
pub struct AppState {
    pub config: ServiceConfig,
    pub catalog: Catalog,
    pub proxy: MapProxy,
}

impl AppState {
    /// State backed by the filesystem cache and a reqwest client.
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let store = Arc::new(FsByteStore::new(config.cache_dir.clone()));
        let fetcher = Arc::new(ReqwestFetcher::new(config.request_timeout)?);
        Ok(Self::with_backends(config, store, fetcher))
    }

    /// State over explicit storage and HTTP backends.
    pub fn with_backends(
        config: ServiceConfig,
        store: Arc<dyn ByteStore>,
        fetcher: Arc<dyn HttpFetch>,
    ) -> Self {
        let cache = CapabilityCache::new(store, fetcher.clone(), config.cache_ttl);
        let catalog = Catalog::new(cache, fetcher.clone(), config.geoapi_url.clone());
        let proxy = MapProxy::new(config.upstream_wms_url.clone(), fetcher);
        Self {
            config,
            catalog,
            proxy,
        }
    }
}
