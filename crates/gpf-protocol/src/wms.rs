//! WMS 1.3.0 capability documents.
//!
//! Layers are the children of the root layer:
//! `WMS_Capabilities/Capability/Layer/Layer`.

use serde::Deserialize;
use tracing::debug;

use crate::adapter::{from_xml, ParsedLayers, ProtocolAdapter};
use crate::layer::{CapabilityLayer, Style, TileSource};
use crate::registry::ProtocolKind;

pub const WMS_VERSION: &str = "1.3.0";

#[derive(Debug, Deserialize)]
struct WmsCapabilitiesXml {
    #[serde(rename = "Capability")]
    capability: CapabilityXml,
}

#[derive(Debug, Deserialize)]
struct CapabilityXml {
    #[serde(rename = "Layer")]
    root: RootLayerXml,
}

#[derive(Debug, Deserialize)]
struct RootLayerXml {
    #[serde(rename = "Layer", default)]
    layers: Vec<WmsLayer>,
}

/// A named layer of a WMS server.
#[derive(Debug, Clone, Deserialize)]
pub struct WmsLayer {
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Style", default)]
    styles: Vec<WmsStyleXml>,
}

#[derive(Debug, Clone, Deserialize)]
struct WmsStyleXml {
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "Title", default)]
    title: String,
}

impl CapabilityLayer for WmsLayer {
    fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn styles(&self) -> Vec<Style> {
        self.styles
            .iter()
            .filter_map(|s| Some(Style::new(s.name.clone()?, s.title.clone())))
            .collect()
    }

    fn tile_source(&self, base_url: &str, style: Option<&Style>) -> TileSource {
        TileSource::Wms {
            url: base_url.to_string(),
            version: WMS_VERSION.to_string(),
            layers: self.name().to_string(),
            styles: style.map(|s| s.name.clone()).unwrap_or_default(),
            format: "image/png".to_string(),
            transparent: true,
        }
    }
}

/// Adapter for WMS servers.
#[derive(Debug, Default, Clone, Copy)]
pub struct WmsAdapter;

impl ProtocolAdapter for WmsAdapter {
    fn kind(&self) -> ProtocolKind {
        ProtocolKind::Wms
    }

    fn capabilities_url(&self, base_url: &str) -> String {
        format!(
            "{}?SERVICE=WMS&VERSION={}&REQUEST=GetCapabilities",
            base_url, WMS_VERSION
        )
    }

    fn parse_layers(&self, document: &str) -> Result<ParsedLayers, String> {
        let caps: WmsCapabilitiesXml = from_xml(document)?;
        let mut layers: ParsedLayers = Vec::with_capacity(caps.capability.root.layers.len());
        for mut layer in caps.capability.root.layers {
            // Group layers without a name cannot be requested.
            if layer.name.as_deref().map_or(true, str::is_empty) {
                debug!(title = %layer.title, "Skipping unnamed WMS layer");
                continue;
            }
            layer.styles.retain(|style| {
                let named = style.name.as_deref().is_some_and(|n| !n.is_empty());
                if !named {
                    debug!(layer = layer_name(&layer.name), title = %style.title, "Skipping unnamed WMS style");
                }
                named
            });
            layers.push(Box::new(layer));
        }
        Ok(layers)
    }
}

fn layer_name(name: &Option<String>) -> &str {
    name.as_deref().unwrap_or_default()
}
