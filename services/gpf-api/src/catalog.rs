//! Browsing the capability documents of the logical servers.

use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, instrument};

use gpf_common::GpfResult;
use gpf_protocol::tms::tile_map_url;
use gpf_protocol::{find_server, Capabilities, Layer, LogicalServer, ProtocolKind, TileSource, SERVERS};
use storage::{CapabilityCache, HttpFetch, Invalidation};

/// Registry entry with its URL resolved.
#[derive(Debug, Clone, Serialize)]
pub struct ServerSummary {
    pub id: &'static str,
    pub title: &'static str,
    pub protocol: ProtocolKind,
    pub url: String,
}

/// Documentation of a layer: the TileMap resource for TMS layers, the
/// uniform layer description otherwise.
#[derive(Debug, Clone)]
pub enum LayerDoc {
    Xml(Bytes),
    Json(Layer),
}

pub struct Catalog {
    cache: CapabilityCache,
    fetcher: Arc<dyn HttpFetch>,
    geoapi_url: String,
}

impl Catalog {
    pub fn new(cache: CapabilityCache, fetcher: Arc<dyn HttpFetch>, geoapi_url: impl Into<String>) -> Self {
        Self {
            cache,
            fetcher,
            geoapi_url: geoapi_url.into(),
        }
    }

    pub fn servers(&self) -> Vec<ServerSummary> {
        SERVERS
            .iter()
            .map(|s| ServerSummary {
                id: s.id,
                title: s.title,
                protocol: s.protocol,
                url: s.url(&self.geoapi_url),
            })
            .collect()
    }

    /// Raw capability document, from the cache when fresh.
    pub async fn capability_document(&self, server_id: &str) -> GpfResult<Bytes> {
        let server = find_server(server_id)?;
        self.document(server).await
    }

    async fn document(&self, server: &LogicalServer) -> GpfResult<Bytes> {
        let url = server.capabilities_url(&self.geoapi_url);
        Ok(self.cache.get(server.id, &url).await?)
    }

    async fn capabilities(&self, server_id: &str) -> GpfResult<(&'static LogicalServer, Capabilities)> {
        let server = find_server(server_id)?;
        let document = self.document(server).await?;
        let caps = Capabilities::parse(server, &server.url(&self.geoapi_url), &document)?;
        Ok((server, caps))
    }

    /// Layers of a server in document order, rebuilt from the document on
    /// every call.
    #[instrument(skip(self))]
    pub async fn list_layers(&self, server_id: &str) -> GpfResult<Vec<Layer>> {
        let (_, caps) = self.capabilities(server_id).await?;
        let layers: Vec<Layer> = caps.layers().collect();
        debug!(count = layers.len(), "Listed layers");
        Ok(layers)
    }

    #[instrument(skip(self))]
    pub async fn layer(&self, server_id: &str, name: &str) -> GpfResult<Layer> {
        let (_, caps) = self.capabilities(server_id).await?;
        caps.layer(name)
    }

    #[instrument(skip(self))]
    pub async fn tile_source(
        &self,
        server_id: &str,
        name: &str,
        style: Option<&str>,
    ) -> GpfResult<TileSource> {
        let (_, caps) = self.capabilities(server_id).await?;
        caps.tile_source(name, style)
    }

    #[instrument(skip(self))]
    pub async fn layer_doc(&self, server_id: &str, name: &str) -> GpfResult<LayerDoc> {
        let (server, caps) = self.capabilities(server_id).await?;
        let layer = caps.layer(name)?;
        match server.protocol {
            ProtocolKind::Tms => {
                let url = tile_map_url(&server.url(&self.geoapi_url), &layer.name);
                Ok(LayerDoc::Xml(self.fetcher.fetch(&url).await?))
            }
            ProtocolKind::Wms | ProtocolKind::Wmts => Ok(LayerDoc::Json(layer)),
        }
    }

    /// Drop a server's cached document.
    pub async fn invalidate(&self, server_id: &str) -> GpfResult<Invalidation> {
        let server = find_server(server_id)?;
        Ok(self.cache.invalidate(server.id).await?)
    }
}
