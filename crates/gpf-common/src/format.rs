//! Image formats the proxy is allowed to return.

use serde::{Deserialize, Serialize};

use crate::{GpfError, GpfResult};

/// Output format of a proxied GetMap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageFormat {
    #[serde(rename = "image/png")]
    Png,
    #[serde(rename = "image/jpeg")]
    Jpeg,
}

impl ImageFormat {
    /// Parse a WMS FORMAT value. Only `image/png` and `image/jpeg` are accepted.
    pub fn from_mime(mime: &str) -> GpfResult<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/png" => Ok(ImageFormat::Png),
            "image/jpeg" => Ok(ImageFormat::Jpeg),
            _ => Err(GpfError::UnsupportedFormat(mime.to_string())),
        }
    }

    /// Content-Type header value.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mime_type())
    }
}
