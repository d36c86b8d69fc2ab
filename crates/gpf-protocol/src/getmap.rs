//! WMS key-value-pair requests accepted by the proxy.

use serde::Deserialize;

use gpf_common::{BoundingBox, GpfError, GpfResult};

pub const DEFAULT_CRS: &str = "EPSG:3857";

/// Raw WMS query parameters, upper or lower case keys.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct WmsParams {
    #[serde(rename = "SERVICE", alias = "service")]
    pub service: Option<String>,
    #[serde(rename = "REQUEST", alias = "request")]
    pub request: Option<String>,
    #[serde(rename = "VERSION", alias = "version")]
    pub version: Option<String>,
    #[serde(rename = "LAYERS", alias = "layers")]
    pub layers: Option<String>,
    #[serde(rename = "STYLES", alias = "styles")]
    pub styles: Option<String>,
    #[serde(rename = "CRS", alias = "SRS", alias = "crs", alias = "srs")]
    pub crs: Option<String>,
    #[serde(rename = "BBOX", alias = "bbox")]
    pub bbox: Option<String>,
    #[serde(rename = "WIDTH", alias = "width")]
    pub width: Option<String>,
    #[serde(rename = "HEIGHT", alias = "height")]
    pub height: Option<String>,
    #[serde(rename = "FORMAT", alias = "format")]
    pub format: Option<String>,
    #[serde(rename = "TRANSPARENT", alias = "transparent")]
    pub transparent: Option<String>,
}

/// A validated WMS request.
#[derive(Debug, Clone, PartialEq)]
pub enum WmsRequest {
    GetCapabilities,
    GetMap(GetMapRequest),
}

/// GetMap parameters. The format is kept as received and checked by the
/// dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub struct GetMapRequest {
    pub layers: Vec<String>,
    pub styles: String,
    pub crs: String,
    pub bbox: BoundingBox,
    /// BBOX exactly as the client sent it, forwarded upstream.
    pub bbox_raw: String,
    pub width: u32,
    pub height: u32,
    pub format: String,
    pub transparent: bool,
}

impl GetMapRequest {
    /// First requested layer; the proxy serves one logical layer per request.
    pub fn layer(&self) -> &str {
        self.layers.first().map(String::as_str).unwrap_or_default()
    }
}

impl WmsRequest {
    pub fn from_params(params: &WmsParams) -> GpfResult<Self> {
        match params.service.as_deref() {
            Some(service) if service.eq_ignore_ascii_case("WMS") => {}
            Some(other) => {
                return Err(GpfError::InvalidParameter {
                    param: "SERVICE".to_string(),
                    message: format!("expected WMS, got {}", other),
                })
            }
            None => return Err(GpfError::MissingParameter("SERVICE".to_string())),
        }

        let request = required(&params.request, "REQUEST")?;
        if request.eq_ignore_ascii_case("GetCapabilities") {
            Ok(WmsRequest::GetCapabilities)
        } else if request.eq_ignore_ascii_case("GetMap") {
            GetMapRequest::from_params(params).map(WmsRequest::GetMap)
        } else {
            Err(GpfError::InvalidParameter {
                param: "REQUEST".to_string(),
                message: format!("unsupported request {}", request),
            })
        }
    }
}

impl GetMapRequest {
    pub fn from_params(params: &WmsParams) -> GpfResult<Self> {
        let layers: Vec<String> = required(&params.layers, "LAYERS")?
            .split(',')
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();
        if layers.is_empty() {
            return Err(GpfError::MissingParameter("LAYERS".to_string()));
        }

        let bbox_raw = required(&params.bbox, "BBOX")?.to_string();
        let bbox = BoundingBox::from_wms_string(&bbox_raw)?;

        Ok(Self {
            layers,
            styles: params.styles.clone().unwrap_or_default(),
            crs: params
                .crs
                .clone()
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_CRS.to_string()),
            bbox,
            bbox_raw,
            width: dimension(&params.width, "WIDTH")?,
            height: dimension(&params.height, "HEIGHT")?,
            format: required(&params.format, "FORMAT")?.to_string(),
            transparent: params
                .transparent
                .as_deref()
                .is_some_and(|t| t.eq_ignore_ascii_case("true")),
        })
    }
}

fn required<'a>(value: &'a Option<String>, name: &str) -> GpfResult<&'a str> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| GpfError::MissingParameter(name.to_string()))
}

fn dimension(value: &Option<String>, name: &str) -> GpfResult<u32> {
    let raw = required(value, name)?;
    match raw.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(GpfError::InvalidParameter {
            param: name.to_string(),
            message: format!("'{}' is not a positive integer", raw),
        }),
    }
}
