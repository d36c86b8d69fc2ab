//! Scale denominator and zoom level conversions.
//!
//! Zoom levels follow the WebMercator tile pyramid: level 0 is a single
//! 256-pixel tile covering the whole projected world square, and each level
//! halves the ground size of a pixel. Scale denominators assume the OGC
//! standard rendering pixel of 0.28 mm (OGC 06-042).

/// Side of the WebMercator world square in meters (2 * PI * 6 378 137).
///
/// Also the ground size of tile (0, 0, 0).
pub const WORLD_SIZE_METERS: f64 = 20037508.3427892476320267 * 2.0;

/// Standard rendering pixel size in meters (0.28 mm).
pub const STD_PIXEL_SIZE_METERS: f64 = 2.8e-4;

/// Tile side in pixels.
pub const TILE_SIZE_PX: f64 = 256.0;

/// Zoom level whose pixels have the given ground size in meters.
pub fn zoom_from_pixel_size(pixel_size_meters: f64) -> f64 {
    (WORLD_SIZE_METERS / (pixel_size_meters * TILE_SIZE_PX)).log2()
}

/// Zoom level matching a scale denominator.
///
/// Undefined for `scale_denominator <= 0`.
pub fn zoom_from_scale(scale_denominator: f64) -> f64 {
    zoom_from_pixel_size(scale_denominator * STD_PIXEL_SIZE_METERS)
}

/// Scale denominator matching a zoom level. Inverse of [`zoom_from_scale`].
pub fn scale_from_zoom(zoom: f64) -> f64 {
    WORLD_SIZE_METERS / (zoom.exp2() * STD_PIXEL_SIZE_METERS * TILE_SIZE_PX)
}

/// Ground size in meters of one pixel at the given zoom level.
pub fn pixel_size_from_zoom(zoom: f64) -> f64 {
    WORLD_SIZE_METERS / (zoom.exp2() * TILE_SIZE_PX)
}
