//! Service configuration.

use std::path::PathBuf;
use std::time::Duration;

use storage::DEFAULT_TTL;

pub const DEFAULT_GEOAPI_URL: &str = "https://geoapi.fr";
pub const DEFAULT_UPSTREAM_WMS_URL: &str = "https://data.geopf.fr/wms-r/wms";

/// Runtime settings of the proxy and capability browser.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Directory holding one cached capability document per server.
    pub cache_dir: PathBuf,
    pub cache_ttl: Duration,
    /// Base URL substituted for `{geoapiUrl}` in server URLs.
    pub geoapi_url: String,
    /// WMS endpoint the proxy forwards GetMap requests to.
    pub upstream_wms_url: String,
    pub request_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("./cache/capabilities"),
            cache_ttl: DEFAULT_TTL,
            geoapi_url: DEFAULT_GEOAPI_URL.to_string(),
            upstream_wms_url: DEFAULT_UPSTREAM_WMS_URL.to_string(),
            request_timeout: Duration::from_secs(60),
        }
    }
}
