//! TMS 1.0.0 service documents.

use serde::Deserialize;
use tracing::warn;

use crate::adapter::{from_xml, ParsedLayers, ProtocolAdapter};
use crate::layer::{CapabilityLayer, Style, TileSource};
use crate::registry::ProtocolKind;

#[derive(Debug, Deserialize)]
struct TileMapServiceXml {
    #[serde(rename = "TileMaps")]
    tile_maps: TileMapsXml,
}

#[derive(Debug, Deserialize)]
struct TileMapsXml {
    #[serde(rename = "TileMap", default)]
    entries: Vec<TileMapXml>,
}

#[derive(Debug, Deserialize)]
struct TileMapXml {
    #[serde(rename = "@href")]
    href: String,
    #[serde(rename = "@title", default)]
    title: String,
    #[serde(rename = "@extension", default)]
    extension: String,
}

/// A tile map of a TMS server.
#[derive(Debug, Clone)]
pub struct TmsLayer {
    name: String,
    title: String,
    extension: String,
}

impl TmsLayer {
    fn from_xml(entry: TileMapXml) -> Option<Self> {
        let name = layer_name_from_href(&entry.href)?;
        Some(Self {
            name: name.to_string(),
            title: entry.title,
            extension: entry.extension,
        })
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }
}

/// The layer name is the last path segment of a tile map's `href`.
pub fn layer_name_from_href(href: &str) -> Option<&str> {
    href.rsplit('/').next().filter(|segment| !segment.is_empty())
}

/// URL of the per-layer TileMap resource.
pub fn tile_map_url(base_url: &str, layer: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), layer)
}

impl CapabilityLayer for TmsLayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn title(&self) -> &str {
        &self.title
    }

    /// TMS has no styles; every layer exposes one unnamed style.
    fn styles(&self) -> Vec<Style> {
        vec![Style::new("", "")]
    }

    fn tile_source(&self, base_url: &str, _style: Option<&Style>) -> TileSource {
        TileSource::Tms {
            url_template: format!(
                "{}/{{z}}/{{x}}/{{y}}.{}",
                tile_map_url(base_url, &self.name),
                self.extension
            ),
            extension: self.extension.clone(),
        }
    }
}

/// Adapter for TMS servers. The service document is the base URL itself.
#[derive(Debug, Default, Clone, Copy)]
pub struct TmsAdapter;

impl ProtocolAdapter for TmsAdapter {
    fn kind(&self) -> ProtocolKind {
        ProtocolKind::Tms
    }

    fn capabilities_url(&self, base_url: &str) -> String {
        base_url.to_string()
    }

    fn parse_layers(&self, document: &str) -> Result<ParsedLayers, String> {
        let service: TileMapServiceXml = from_xml(document)?;
        let mut layers: ParsedLayers = Vec::with_capacity(service.tile_maps.entries.len());
        for entry in service.tile_maps.entries {
            let href = entry.href.clone();
            match TmsLayer::from_xml(entry) {
                Some(layer) => layers.push(Box::new(layer)),
                None => warn!(href = %href, "Skipping tile map without a name"),
            }
        }
        Ok(layers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_name_from_href() {
        assert_eq!(
            layer_name_from_href("https://data.geopf.fr/tms/1.0.0/PLAN.IGN"),
            Some("PLAN.IGN")
        );
        assert_eq!(layer_name_from_href("PCI"), Some("PCI"));
        assert_eq!(layer_name_from_href("https://data.geopf.fr/tms/1.0.0/"), None);
    }

    #[test]
    fn test_tile_map_url() {
        assert_eq!(
            tile_map_url("https://data.geopf.fr/tms/1.0.0/", "PCI"),
            "https://data.geopf.fr/tms/1.0.0/PCI"
        );
    }

    #[test]
    fn test_entry_without_name_is_skipped() {
        let xml = r#"<TileMapService><TileMaps>
            <TileMap title="A" extension="png" href="https://x/tms/A"/>
            <TileMap title="B" extension="png" href="https://x/tms/"/>
        </TileMaps></TileMapService>"#;
        let layers = TmsAdapter.parse_layers(xml).unwrap();
        assert_eq!(layers.len(), 1);
        assert_eq!(layers[0].name(), "A");
    }
}
