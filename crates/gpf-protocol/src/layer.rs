//! Protocol-independent layer model handed to map clients.

use std::collections::BTreeMap;

use serde::Serialize;

use gpf_common::{GpfError, GpfResult};

/// A rendering style of a layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Style {
    pub name: String,
    pub title: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_default: bool,
}

impl Style {
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            is_default: false,
        }
    }
}

/// Min/max tile matrix identifiers advertised for a WMTS layer.
///
/// Scanning starts from `min = i32::MAX` (no level seen yet) and `max = -1`,
/// so a layer without any limits ends up with `max < min`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomBounds {
    pub min: i32,
    pub max: i32,
}

impl ZoomBounds {
    pub const NONE: ZoomBounds = ZoomBounds {
        min: i32::MAX,
        max: -1,
    };

    /// Scan tile matrix identifiers, treating them as integers.
    ///
    /// Identifiers that are not integers are ignored.
    pub fn from_matrix_ids<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        ids.into_iter()
            .filter_map(|id| id.trim().parse::<i32>().ok())
            .fold(Self::NONE, |bounds, z| ZoomBounds {
                min: bounds.min.min(z),
                max: bounds.max.max(z),
            })
    }

    /// True when no level was found.
    pub fn is_empty(&self) -> bool {
        self.max < self.min
    }

    /// `(min, max)` if at least one level was found.
    pub fn range(&self) -> Option<(i32, i32)> {
        (!self.is_empty()).then_some((self.min, self.max))
    }
}

/// Rendering parameters a map client needs to display a layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "protocol", rename_all = "UPPERCASE")]
pub enum TileSource {
    /// Parametric WMS GetMap queries against `url`.
    Wms {
        url: String,
        version: String,
        layers: String,
        styles: String,
        format: String,
        transparent: bool,
    },
    /// Tile grid addressed through `{z}`, `{x}` and `{y}` placeholders.
    Wmts {
        url_template: String,
        format: String,
        style: String,
        tile_matrix_set: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        min_zoom: Option<i32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max_zoom: Option<i32>,
    },
    /// TMS tile grid, `{z}/{x}/{y}.{extension}`.
    Tms {
        url_template: String,
        extension: String,
    },
}

impl TileSource {
    /// URL with placeholders for WMTS/TMS, base URL for WMS.
    pub fn url(&self) -> &str {
        match self {
            TileSource::Wms { url, .. } => url,
            TileSource::Wmts { url_template, .. } | TileSource::Tms { url_template, .. } => {
                url_template
            }
        }
    }
}

/// A layer as exposed by one protocol's capability document.
pub trait CapabilityLayer: Send + Sync {
    fn name(&self) -> &str;

    fn title(&self) -> &str;

    /// Styles in document order.
    fn styles(&self) -> Vec<Style>;

    /// Tile source for this layer served from `base_url` with `style`.
    fn tile_source(&self, base_url: &str, style: Option<&Style>) -> TileSource;
}

/// Uniform, protocol-independent layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    pub name: String,
    pub title: String,
    pub styles: BTreeMap<String, Style>,
    /// Tile source using the layer's default style.
    pub tile_source: TileSource,
}

impl Layer {
    pub fn from_capability(layer: &dyn CapabilityLayer, base_url: &str) -> Self {
        let styles = layer.styles();
        let default_style = default_style(&styles);
        let tile_source = layer.tile_source(base_url, default_style);
        Self {
            name: layer.name().to_string(),
            title: layer.title().to_string(),
            tile_source,
            styles: styles.into_iter().map(|s| (s.name.clone(), s)).collect(),
        }
    }
}

/// Style used when the caller does not name one: the only style, else the
/// one flagged as default, else the first.
pub fn default_style(styles: &[Style]) -> Option<&Style> {
    match styles {
        [] => None,
        [only] => Some(only),
        _ => styles.iter().find(|s| s.is_default).or_else(|| styles.first()),
    }
}

/// Resolve a requested style name against a layer's styles.
pub fn resolve_style<'a>(
    layer: &str,
    styles: &'a [Style],
    requested: Option<&str>,
) -> GpfResult<Option<&'a Style>> {
    match requested {
        None => Ok(default_style(styles)),
        Some(name) => styles
            .iter()
            .find(|s| s.name == name)
            .map(Some)
            .ok_or_else(|| GpfError::StyleNotFound {
                layer: layer.to_string(),
                style: name.to_string(),
            }),
    }
}
