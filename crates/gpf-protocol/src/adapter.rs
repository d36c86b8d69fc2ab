//! Normalization of protocol-specific capability documents.

use std::borrow::Cow;

use tracing::debug;

use gpf_common::{GpfError, GpfResult};

use crate::layer::{resolve_style, CapabilityLayer, Layer, TileSource};
use crate::registry::{LogicalServer, ProtocolKind};
use crate::tms::TmsAdapter;
use crate::wms::WmsAdapter;
use crate::wmts::WmtsAdapter;

pub(crate) static WMS_ADAPTER: WmsAdapter = WmsAdapter;
pub(crate) static WMTS_ADAPTER: WmtsAdapter = WmtsAdapter;
pub(crate) static TMS_ADAPTER: TmsAdapter = TmsAdapter;

/// Parsed layers of one capability document, in document order.
pub type ParsedLayers = Vec<Box<dyn CapabilityLayer>>;

/// Per-protocol rules for reading a capability document.
pub trait ProtocolAdapter: Send + Sync {
    fn kind(&self) -> ProtocolKind;

    /// URL returning the capability document of a server rooted at `base_url`.
    fn capabilities_url(&self, base_url: &str) -> String;

    /// Rewrite the raw document before parsing. Identity by default.
    fn preprocess<'a>(&self, document: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(document)
    }

    /// Extract the layer list from a preprocessed document.
    ///
    /// Errors are returned as a human-readable reason.
    fn parse_layers(&self, document: &str) -> Result<ParsedLayers, String>;
}

/// Capability document of one logical server, parsed into layers.
pub struct Capabilities {
    server: String,
    base_url: String,
    layers: ParsedLayers,
}

impl Capabilities {
    /// Parse a raw capability document fetched for `server`.
    pub fn parse(server: &LogicalServer, base_url: &str, document: &[u8]) -> GpfResult<Self> {
        let parse_failed = |reason: String| GpfError::CapabilityParseFailed {
            server: server.id.to_string(),
            reason,
        };

        let text = std::str::from_utf8(document).map_err(|e| parse_failed(e.to_string()))?;
        let adapter = server.protocol.adapter();
        let layers = adapter
            .parse_layers(&adapter.preprocess(text))
            .map_err(parse_failed)?;

        debug!(
            server = %server.id,
            protocol = adapter.kind().as_str(),
            layers = layers.len(),
            "Parsed capabilities"
        );

        Ok(Self {
            server: server.id.to_string(),
            base_url: base_url.to_string(),
            layers,
        })
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Uniform layers in document order.
    pub fn layers(&self) -> impl Iterator<Item = Layer> + '_ {
        self.layers
            .iter()
            .map(|layer| Layer::from_capability(layer.as_ref(), &self.base_url))
    }

    /// Find a layer by name.
    pub fn layer(&self, name: &str) -> GpfResult<Layer> {
        self.find(name)
            .map(|layer| Layer::from_capability(layer, &self.base_url))
    }

    /// Tile source of a layer for an explicitly chosen style, or its default
    /// style when `style` is `None`.
    pub fn tile_source(&self, name: &str, style: Option<&str>) -> GpfResult<TileSource> {
        let layer = self.find(name)?;
        let styles = layer.styles();
        let style = resolve_style(name, &styles, style)?;
        Ok(layer.tile_source(&self.base_url, style))
    }

    fn find(&self, name: &str) -> GpfResult<&dyn CapabilityLayer> {
        self.layers
            .iter()
            .map(|layer| layer.as_ref())
            .find(|layer| layer.name() == name)
            .ok_or_else(|| GpfError::LayerNotFound {
                server: self.server.clone(),
                layer: name.to_string(),
            })
    }
}

/// Deserialize a capability document with quick-xml, reporting errors as text.
pub(crate) fn from_xml<T: serde::de::DeserializeOwned>(document: &str) -> Result<T, String> {
    quick_xml::de::from_str(document).map_err(|e| e.to_string())
}
