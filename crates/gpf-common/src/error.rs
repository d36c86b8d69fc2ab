//! Error types for the geodata platform proxy and capability browser.

use thiserror::Error;

use crate::grouping::group_thousands;

/// Result type alias using GpfError.
pub type GpfResult<T> = Result<T, GpfError>;

/// Primary error type for proxy and capability operations.
#[derive(Debug, Error)]
pub enum GpfError {
    // === Scale Errors ===
    #[error(
        "scale denominator {} > {} (zoom {zoom}): zoomed out too far for this layer set",
        group_thousands(*scale_denominator),
        group_thousands(*max_scale)
    )]
    InvalidScaleTooCoarse {
        scale_denominator: f64,
        max_scale: f64,
        zoom: f64,
    },

    #[error(
        "scale denominator {} < {} (zoom {zoom}): zoomed in too far for this layer set",
        group_thousands(*scale_denominator),
        group_thousands(*min_scale)
    )]
    InvalidScaleTooFine {
        scale_denominator: f64,
        min_scale: f64,
        zoom: f64,
    },

    // === Protocol Errors ===
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    #[error("Invalid BBOX: {0}")]
    InvalidBbox(String),

    #[error("Requested format not supported: {0}")]
    UnsupportedFormat(String),

    // === Lookup Errors ===
    #[error("Unknown server: {0}")]
    UnknownServer(String),

    #[error("Layer '{layer}' not found on server '{server}'")]
    LayerNotFound { server: String, layer: String },

    #[error("Style '{style}' not found for layer '{layer}'")]
    StyleNotFound { layer: String, style: String },

    // === Upstream Errors ===
    #[error("Failed to read {url}: {reason}")]
    UpstreamFetchFailed { url: String, reason: String },

    #[error("Unreadable capabilities for server '{server}': {reason}")]
    CapabilityParseFailed { server: String, reason: String },

    // === Infrastructure Errors ===
    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl GpfError {
    /// Get the OGC WMS exception code for this error.
    pub fn wms_exception_code(&self) -> &'static str {
        match self {
            GpfError::MissingParameter(_) => "MissingParameterValue",
            GpfError::InvalidParameter { .. }
            | GpfError::InvalidScaleTooCoarse { .. }
            | GpfError::InvalidScaleTooFine { .. } => "InvalidParameterValue",
            GpfError::InvalidBbox(_) => "InvalidBBox",
            GpfError::UnsupportedFormat(_) => "InvalidFormat",
            GpfError::LayerNotFound { .. } => "LayerNotDefined",
            GpfError::StyleNotFound { .. } => "StyleNotDefined",
            _ => "NoApplicableCode",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            GpfError::InvalidScaleTooCoarse { .. }
            | GpfError::InvalidScaleTooFine { .. }
            | GpfError::MissingParameter(_)
            | GpfError::InvalidParameter { .. }
            | GpfError::InvalidBbox(_)
            | GpfError::UnsupportedFormat(_) => 400,

            GpfError::UnknownServer(_)
            | GpfError::LayerNotFound { .. }
            | GpfError::StyleNotFound { .. } => 404,

            GpfError::UpstreamFetchFailed { .. } => 502,

            _ => 500,
        }
    }

    /// Short label used for metrics and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            GpfError::InvalidScaleTooCoarse { .. } => "scale_too_coarse",
            GpfError::InvalidScaleTooFine { .. } => "scale_too_fine",
            GpfError::MissingParameter(_) | GpfError::InvalidParameter { .. } => "bad_parameter",
            GpfError::InvalidBbox(_) => "bad_bbox",
            GpfError::UnsupportedFormat(_) => "unsupported_format",
            GpfError::UnknownServer(_) => "unknown_server",
            GpfError::LayerNotFound { .. } => "unknown_layer",
            GpfError::StyleNotFound { .. } => "unknown_style",
            GpfError::UpstreamFetchFailed { .. } => "upstream_fetch_failed",
            GpfError::CapabilityParseFailed { .. } => "capability_parse_failed",
            GpfError::CacheError(_) => "cache",
            GpfError::InternalError(_) => "internal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_rejection_message_groups_thousands() {
        let err = GpfError::InvalidScaleTooCoarse {
            scale_denominator: 2_183_915.0,
            max_scale: 2_000_000.0,
            zoom: 8.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("2_183_915"), "{}", msg);
        assert!(msg.contains("2_000_000"), "{}", msg);
        assert!(msg.contains("zoom 8"), "{}", msg);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(GpfError::UnsupportedFormat("image/gif".into()).http_status_code(), 400);
        assert_eq!(GpfError::UnknownServer("x".into()).http_status_code(), 404);
        assert_eq!(
            GpfError::UpstreamFetchFailed {
                url: "https://example.org".into(),
                reason: "timeout".into()
            }
            .http_status_code(),
            502
        );
        assert_eq!(
            GpfError::CapabilityParseFailed {
                server: "wms-r".into(),
                reason: "eof".into()
            }
            .http_status_code(),
            500
        );
    }

    #[test]
    fn test_exception_codes() {
        assert_eq!(
            GpfError::UnsupportedFormat("image/gif".into()).wms_exception_code(),
            "InvalidFormat"
        );
        assert_eq!(
            GpfError::LayerNotFound {
                server: "proxy".into(),
                layer: "nope".into()
            }
            .wms_exception_code(),
            "LayerNotDefined"
        );
    }
}
