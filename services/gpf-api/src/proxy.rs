//! GetMap dispatch: pick the pyramid layer for the requested scale and
//! relay the upstream image.

use std::sync::Arc;

use bytes::Bytes;
use metrics::counter;
use tracing::{info, instrument, warn};
use urlencoding::encode;

use gpf_common::{threshold_table, GpfError, GpfResult, ImageFormat};
use gpf_protocol::GetMapRequest;
use storage::HttpFetch;

/// Server id under which the proxy's logical layers are reported.
pub const PROXY_SERVER_ID: &str = "pWms";

/// Image bytes as returned by the upstream server.
#[derive(Debug, Clone)]
pub struct MapImage {
    pub bytes: Bytes,
    pub format: ImageFormat,
}

impl MapImage {
    pub fn content_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

pub struct MapProxy {
    upstream_url: String,
    fetcher: Arc<dyn HttpFetch>,
}

impl MapProxy {
    pub fn new(upstream_url: impl Into<String>, fetcher: Arc<dyn HttpFetch>) -> Self {
        Self {
            upstream_url: upstream_url.into(),
            fetcher,
        }
    }

    /// Upstream GetMap URL for one physical layer. The bbox is forwarded
    /// as the client sent it. Client values are percent-encoded so they
    /// cannot add parameters of their own.
    pub fn upstream_url(&self, layer: &str, request: &GetMapRequest) -> String {
        format!(
            "{}?SERVICE=WMS&VERSION=1.3.0&REQUEST=GetMap&LAYERS={}&STYLES=\
             &CRS={}&BBOX={}&WIDTH={}&HEIGHT={}&FORMAT={}&TRANSPARENT={}",
            self.upstream_url,
            layer,
            encode(&request.crs),
            encode(&request.bbox_raw),
            request.width,
            request.height,
            encode(&request.format),
            request.transparent,
        )
    }

    /// Serve a GetMap request on a logical layer.
    #[instrument(skip(self, request), fields(layer = %request.layer(), width = request.width))]
    pub async fn get_map(&self, request: &GetMapRequest) -> GpfResult<MapImage> {
        counter!("gpf_getmap_requests_total").increment(1);

        let result = self.dispatch(request).await;
        if let Err(err) = &result {
            match err {
                GpfError::UpstreamFetchFailed { url, reason } => {
                    counter!("gpf_upstream_fetch_failures_total").increment(1);
                    warn!(url = %url, reason = %reason, "Upstream GetMap failed");
                }
                other => {
                    counter!("gpf_getmap_rejected_total", "reason" => other.kind()).increment(1);
                    info!(error = %other, "GetMap rejected");
                }
            }
        }
        result
    }

    async fn dispatch(&self, request: &GetMapRequest) -> GpfResult<MapImage> {
        // Checked first so that no upstream request is made for it.
        let format = ImageFormat::from_mime(&request.format)?;

        let table = threshold_table(request.layer()).ok_or_else(|| GpfError::LayerNotFound {
            server: PROXY_SERVER_ID.to_string(),
            layer: request.layer().to_string(),
        })?;
        let selection = table.select(&request.bbox, request.width)?;

        info!(
            zoom = selection.scale.zoom,
            scale_denominator = selection.scale.scale_denominator,
            layer = selection.layer,
            "Selected pyramid layer"
        );

        let url = self.upstream_url(selection.layer, request);
        let bytes = self.fetcher.fetch(&url).await?;

        Ok(MapImage { bytes, format })
    }
}
