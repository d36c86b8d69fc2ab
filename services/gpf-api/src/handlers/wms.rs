//! WMS proxy endpoint.
//!
//! Handles WMS 1.3.0 requests on the proxy's logical layers:
//! - GetCapabilities: the proxy's own capabilities document
//! - GetMap: relayed to the upstream pyramid layer matching the scale

use std::sync::Arc;

use axum::{
    extract::{Extension, OriginalUri, Query},
    http::HeaderMap,
    response::Response,
};
use tracing::instrument;

use gpf_protocol::{online_resource, proxy_capabilities, WmsParams, WmsRequest};

use super::common::{bytes_response, header_str, wms_exception};
use crate::state::AppState;

#[instrument(skip(state, headers, uri))]
pub async fn wms_handler(
    Extension(state): Extension<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    Query(params): Query<WmsParams>,
) -> Response {
    let request = match WmsRequest::from_params(&params) {
        Ok(r) => r,
        Err(e) => return wms_exception(&e),
    };

    match request {
        WmsRequest::GetCapabilities => {
            let scheme = header_str(&headers, "x-forwarded-proto").unwrap_or("http");
            let host = header_str(&headers, "host").unwrap_or("localhost");
            let xml = proxy_capabilities(&online_resource(scheme, host, uri.path()));
            bytes_response("text/xml", xml.into())
        }
        WmsRequest::GetMap(getmap) => match state.proxy.get_map(&getmap).await {
            Ok(image) => bytes_response(image.content_type(), image.bytes),
            Err(e) => wms_exception(&e),
        },
    }
}
