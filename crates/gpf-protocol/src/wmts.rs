//! WMTS 1.0.0 capability documents.
//!
//! Element names carry the `ows:` prefix. The document is rewritten to use
//! `ows_` before parsing so that the serde field names stay plain strings.

use std::borrow::Cow;

use serde::Deserialize;

use crate::adapter::{from_xml, ParsedLayers, ProtocolAdapter};
use crate::layer::{CapabilityLayer, Style, TileSource, ZoomBounds};
use crate::registry::ProtocolKind;

pub const WMTS_VERSION: &str = "1.0.0";

/// Tile matrix set preferred when a layer links several.
pub const PSEUDO_MERCATOR_SET: &str = "PM";

#[derive(Debug, Deserialize)]
struct WmtsCapabilitiesXml {
    #[serde(rename = "Contents")]
    contents: ContentsXml,
}

#[derive(Debug, Deserialize)]
struct ContentsXml {
    #[serde(rename = "Layer", default)]
    layers: Vec<WmtsLayer>,
}

/// A WMTS layer.
#[derive(Debug, Clone, Deserialize)]
pub struct WmtsLayer {
    #[serde(rename = "ows_Identifier")]
    identifier: String,
    #[serde(rename = "ows_Title", default)]
    title: String,
    #[serde(rename = "Style", default)]
    styles: Vec<WmtsStyleXml>,
    #[serde(rename = "Format", default)]
    formats: Vec<String>,
    #[serde(rename = "TileMatrixSetLink", default)]
    links: Vec<TileMatrixSetLinkXml>,
}

#[derive(Debug, Clone, Deserialize)]
struct WmtsStyleXml {
    #[serde(rename = "@isDefault", default)]
    is_default: Option<bool>,
    #[serde(rename = "ows_Identifier")]
    identifier: String,
    #[serde(rename = "ows_Title", default)]
    title: String,
}

#[derive(Debug, Clone, Deserialize)]
struct TileMatrixSetLinkXml {
    #[serde(rename = "TileMatrixSet")]
    tile_matrix_set: String,
    #[serde(rename = "TileMatrixSetLimits", default)]
    limits: Option<TileMatrixSetLimitsXml>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct TileMatrixSetLimitsXml {
    #[serde(rename = "TileMatrixLimits", default)]
    limits: Vec<TileMatrixLimitsXml>,
}

#[derive(Debug, Clone, Deserialize)]
struct TileMatrixLimitsXml {
    #[serde(rename = "TileMatrix")]
    tile_matrix: String,
}

impl WmtsLayer {
    /// The pseudo-mercator link if present, else the first one.
    fn preferred_link(&self) -> Option<&TileMatrixSetLinkXml> {
        self.links
            .iter()
            .find(|link| link.tile_matrix_set == PSEUDO_MERCATOR_SET)
            .or_else(|| self.links.first())
    }

    /// Zoom levels advertised by the preferred tile matrix set link.
    pub fn zoom_bounds(&self) -> ZoomBounds {
        self.preferred_link()
            .and_then(|link| link.limits.as_ref())
            .map(|limits| {
                ZoomBounds::from_matrix_ids(limits.limits.iter().map(|l| l.tile_matrix.as_str()))
            })
            .unwrap_or(ZoomBounds::NONE)
    }

    fn tile_matrix_set(&self) -> &str {
        self.preferred_link()
            .map(|link| link.tile_matrix_set.as_str())
            .unwrap_or(PSEUDO_MERCATOR_SET)
    }

    fn format(&self) -> &str {
        self.formats.first().map(String::as_str).unwrap_or("image/png")
    }
}

impl CapabilityLayer for WmtsLayer {
    fn name(&self) -> &str {
        &self.identifier
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn styles(&self) -> Vec<Style> {
        self.styles
            .iter()
            .map(|s| Style {
                name: s.identifier.clone(),
                title: s.title.clone(),
                is_default: s.is_default.unwrap_or(false),
            })
            .collect()
    }

    fn tile_source(&self, base_url: &str, style: Option<&Style>) -> TileSource {
        let style = style.map(|s| s.name.as_str()).unwrap_or_default();
        let tile_matrix_set = self.tile_matrix_set();
        let format = self.format();
        let url_template = format!(
            "{base_url}?service=WMTS&version={WMTS_VERSION}&request=GetTile\
             &tilematrixSet={tile_matrix_set}&height=256&width=256\
             &tilematrix={{z}}&tilecol={{x}}&tilerow={{y}}\
             &layer={layer}&format={format}&style={style}",
            layer = self.identifier,
            style = urlencoding::encode(style),
        );
        let bounds = self.zoom_bounds().range();

        TileSource::Wmts {
            url_template,
            format: format.to_string(),
            style: style.to_string(),
            tile_matrix_set: tile_matrix_set.to_string(),
            min_zoom: bounds.map(|(min, _)| min),
            max_zoom: bounds.map(|(_, max)| max),
        }
    }
}

/// Adapter for WMTS servers.
#[derive(Debug, Default, Clone, Copy)]
pub struct WmtsAdapter;

impl ProtocolAdapter for WmtsAdapter {
    fn kind(&self) -> ProtocolKind {
        ProtocolKind::Wmts
    }

    fn capabilities_url(&self, base_url: &str) -> String {
        format!(
            "{}?SERVICE=WMTS&VERSION={}&REQUEST=GetCapabilities",
            base_url, WMTS_VERSION
        )
    }

    fn preprocess<'a>(&self, document: &'a str) -> Cow<'a, str> {
        if document.contains("ows:") {
            Cow::Owned(document.replace("ows:", "ows_"))
        } else {
            Cow::Borrowed(document)
        }
    }

    fn parse_layers(&self, document: &str) -> Result<ParsedLayers, String> {
        let caps: WmtsCapabilitiesXml = from_xml(document)?;
        Ok(caps
            .contents
            .layers
            .into_iter()
            .map(|layer| Box::new(layer) as Box<dyn CapabilityLayer>)
            .collect())
    }
}
