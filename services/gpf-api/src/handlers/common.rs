//! Response helpers shared by the WMS and JSON handlers.

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use tracing::error;

use gpf_common::GpfError;
use gpf_protocol::error_to_exception_xml;

/// HTTP status of an error.
pub fn status_of(err: &GpfError) -> StatusCode {
    StatusCode::from_u16(err.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// OGC service exception report for an error.
pub fn wms_exception(err: &GpfError) -> Response {
    let status = status_of(err);
    if status.is_server_error() {
        error!(error = %err, kind = err.kind(), "WMS request failed");
    }
    (
        status,
        [(header::CONTENT_TYPE, "text/xml")],
        error_to_exception_xml(err),
    )
        .into_response()
}

/// Body with an explicit content type.
pub fn bytes_response(content_type: &'static str, body: Bytes) -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, content_type)], body).into_response()
}

/// Header value as a string, if present and visible ASCII.
pub fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Error returned by the JSON API, rendered as `{"error", "kind"}`.
#[derive(Debug)]
pub struct ApiError(pub GpfError);

impl From<GpfError> for ApiError {
    fn from(err: GpfError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_of(&self.0);
        if status.is_server_error() {
            error!(error = %self.0, kind = self.0.kind(), "API request failed");
        }
        let body = serde_json::json!({
            "error": self.0.to_string(),
            "kind": self.0.kind(),
        });
        (status, axum::Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
