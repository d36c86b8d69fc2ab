//! Registry of the logical upstream servers of the geodata platform.

use serde::Serialize;

use gpf_common::{GpfError, GpfResult};

use crate::adapter::{ProtocolAdapter, TMS_ADAPTER, WMS_ADAPTER, WMTS_ADAPTER};

/// Placeholder in server URLs replaced by the hosting environment's base URL.
pub const GEOAPI_PLACEHOLDER: &str = "{geoapiUrl}";

/// Protocol spoken by a logical server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProtocolKind {
    Wms,
    Wmts,
    Tms,
}

impl ProtocolKind {
    /// Adapter normalizing this protocol's capability documents.
    pub fn adapter(&self) -> &'static dyn ProtocolAdapter {
        match self {
            ProtocolKind::Wms => &WMS_ADAPTER,
            ProtocolKind::Wmts => &WMTS_ADAPTER,
            ProtocolKind::Tms => &TMS_ADAPTER,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProtocolKind::Wms => "WMS",
            ProtocolKind::Wmts => "WMTS",
            ProtocolKind::Tms => "TMS",
        }
    }
}

impl std::fmt::Display for ProtocolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A logical upstream server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LogicalServer {
    pub id: &'static str,
    pub title: &'static str,
    pub protocol: ProtocolKind,
    /// Base URL, possibly containing [`GEOAPI_PLACEHOLDER`].
    pub url_template: &'static str,
}

impl LogicalServer {
    /// Base URL with the hosting environment's URL substituted.
    pub fn url(&self, geoapi_url: &str) -> String {
        self.url_template
            .replace(GEOAPI_PLACEHOLDER, geoapi_url.trim_end_matches('/'))
    }

    /// URL of this server's capability document.
    pub fn capabilities_url(&self, geoapi_url: &str) -> String {
        self.protocol.adapter().capabilities_url(&self.url(geoapi_url))
    }
}

/// Servers of the geodata platform, in display order.
pub const SERVERS: &[LogicalServer] = &[
    LogicalServer {
        id: "wmts",
        title: "WMTS",
        protocol: ProtocolKind::Wmts,
        url_template: "https://data.geopf.fr/wmts",
    },
    LogicalServer {
        id: "wmts-beta",
        title: "WMTS béta",
        protocol: ProtocolKind::Wmts,
        url_template: "https://data.geopf.fr/beta/wmts",
    },
    LogicalServer {
        id: "wms-r",
        title: "WMS-R",
        protocol: ProtocolKind::Wms,
        url_template: "https://data.geopf.fr/wms-r/wms",
    },
    LogicalServer {
        id: "wms-v",
        title: "WMS-V",
        protocol: ProtocolKind::Wms,
        url_template: "https://data.geopf.fr/wms-v/ows",
    },
    LogicalServer {
        id: "pWms",
        title: "pWms",
        protocol: ProtocolKind::Wms,
        url_template: "{geoapiUrl}/gpf/pwms.php",
    },
    LogicalServer {
        id: "tms",
        title: "TMS",
        protocol: ProtocolKind::Tms,
        url_template: "https://data.geopf.fr/tms/1.0.0",
    },
];

/// Look up a logical server by id.
pub fn find_server(id: &str) -> GpfResult<&'static LogicalServer> {
    SERVERS
        .iter()
        .find(|s| s.id == id)
        .ok_or_else(|| GpfError::UnknownServer(id.to_string()))
}
