//! Scale-aware selection of an upstream raster pyramid layer.
//!
//! A logical layer served by the proxy is backed by several physical pyramid
//! layers, each precomputed for a scale range. The selector measures the scale
//! of a requested map and picks the pyramid layer covering it.

use serde::Serialize;

use crate::zoom::{zoom_from_pixel_size, STD_PIXEL_SIZE_METERS};
use crate::{BoundingBox, GpfError, GpfResult};

/// One scale band of a threshold table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PyramidBand {
    /// Lower scale bound; exclusive unless `lower_inclusive`.
    pub lower: f64,
    /// Upper scale bound, inclusive.
    pub upper: f64,
    pub lower_inclusive: bool,
    /// Physical upstream layer name.
    pub layer: &'static str,
}

impl PyramidBand {
    pub fn contains(&self, scale_denominator: f64) -> bool {
        let above_lower = if self.lower_inclusive {
            scale_denominator >= self.lower
        } else {
            scale_denominator > self.lower
        };
        above_lower && scale_denominator <= self.upper
    }
}

/// Ordered scale bands of a logical layer, coarsest first.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdTable {
    /// Logical layer name exposed by the proxy.
    pub alias: &'static str,
    pub bands: &'static [PyramidBand],
}

/// Scale measurements of one requested map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapScale {
    /// Ground size of one pixel in meters.
    pub pixel_size: f64,
    /// Scale denominator rounded to an integer.
    pub scale_denominator: f64,
    /// Zoom level rounded to an integer, derived from `pixel_size`.
    pub zoom: f64,
}

impl MapScale {
    /// Measure the scale of a map covering `bbox` rendered `width` pixels wide.
    ///
    /// The zoom level is derived from the unrounded pixel size, never from the
    /// rounded scale denominator.
    pub fn measure(bbox: &BoundingBox, width: u32) -> GpfResult<Self> {
        if width == 0 {
            return Err(GpfError::InvalidParameter {
                param: "WIDTH".to_string(),
                message: "WIDTH must be greater than 0".to_string(),
            });
        }
        let ground_width = bbox.width();
        if !(ground_width > 0.0) {
            return Err(GpfError::InvalidBbox(format!(
                "maxx must be greater than minx, got {}",
                bbox.to_wms_string()
            )));
        }

        let width = width as f64;
        let pixel_size = ground_width / width;
        Ok(Self {
            pixel_size,
            scale_denominator: (ground_width / (width * STD_PIXEL_SIZE_METERS)).round(),
            zoom: zoom_from_pixel_size(pixel_size).round(),
        })
    }
}

/// Outcome of a successful selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayerSelection {
    pub layer: &'static str,
    #[serde(flatten)]
    pub scale: MapScale,
}

impl ThresholdTable {
    /// Smallest supported scale denominator.
    pub fn min_scale(&self) -> f64 {
        self.bands.last().map_or(f64::INFINITY, |b| b.lower)
    }

    /// Largest supported scale denominator.
    pub fn max_scale(&self) -> f64 {
        self.bands.first().map_or(f64::NEG_INFINITY, |b| b.upper)
    }

    /// Every band must start exactly where the next coarser one ends, and only
    /// the finest band may include its lower bound.
    pub fn is_contiguous(&self) -> bool {
        if self.bands.is_empty() {
            return false;
        }
        let last = self.bands.len() - 1;
        self.bands.windows(2).all(|pair| pair[0].lower == pair[1].upper)
            && self
                .bands
                .iter()
                .enumerate()
                .all(|(i, b)| b.lower < b.upper && b.lower_inclusive == (i == last))
    }

    /// Map a measured scale to a pyramid layer.
    pub fn layer_for(&self, scale: &MapScale) -> GpfResult<&'static str> {
        let s = scale.scale_denominator;
        if s > self.max_scale() {
            return Err(GpfError::InvalidScaleTooCoarse {
                scale_denominator: s,
                max_scale: self.max_scale(),
                zoom: scale.zoom,
            });
        }
        if s < self.min_scale() {
            return Err(GpfError::InvalidScaleTooFine {
                scale_denominator: s,
                min_scale: self.min_scale(),
                zoom: scale.zoom,
            });
        }

        self.bands
            .iter()
            .find(|band| band.contains(s))
            .map(|band| band.layer)
            .ok_or_else(|| {
                GpfError::InternalError(format!(
                    "no band of '{}' covers scale denominator {}",
                    self.alias, s
                ))
            })
    }

    /// Measure the requested map and select the matching pyramid layer.
    pub fn select(&self, bbox: &BoundingBox, width: u32) -> GpfResult<LayerSelection> {
        let scale = MapScale::measure(bbox, width)?;
        let layer = self.layer_for(&scale)?;
        Ok(LayerSelection { layer, scale })
    }
}

/// IGN scanned maps, from 1:1 000 000 down to 1:25 000.
pub const CARTES_IGN: ThresholdTable = ThresholdTable {
    alias: "cartesIGN",
    bands: &[
        PyramidBand {
            lower: 500_000.0,
            upper: 2_000_000.0,
            lower_inclusive: false,
            layer: "SCAN1000_PYR-JPEG_WLD_WM",
        },
        // 1:250k
        PyramidBand {
            lower: 150_000.0,
            upper: 500_000.0,
            lower_inclusive: false,
            layer: "SCANREG_PYR-JPEG_WLD_WM",
        },
        // 1:150k
        PyramidBand {
            lower: 100_000.0,
            upper: 150_000.0,
            lower_inclusive: false,
            layer: "SCANDEP_PYR-JPEG_FXX_WM",
        },
        PyramidBand {
            lower: 50_000.0,
            upper: 100_000.0,
            lower_inclusive: false,
            layer: "SCAN100_PYR-JPEG_WLD_WM",
        },
        PyramidBand {
            lower: 2_000.0,
            upper: 50_000.0,
            lower_inclusive: true,
            layer: "SCAN25TOUR_PYR-JPEG_WLD_WM",
        },
    ],
};

/// Logical layers served by the proxy.
pub const PROXY_LAYERS: &[ThresholdTable] = &[CARTES_IGN];

/// Find the threshold table of a logical layer.
pub fn threshold_table(alias: &str) -> Option<&'static ThresholdTable> {
    PROXY_LAYERS.iter().find(|t| t.alias == alias)
}
