//! End-to-end behaviour of the proxy and the browsing API over scripted
//! upstream servers.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use metrics_exporter_prometheus::PrometheusBuilder;
use tower::ServiceExt;

use gpf_api::{config::ServiceConfig, router, state::AppState};
use storage::{MemoryByteStore, ScriptedFetcher};
use test_utils::fixtures::{
    PNG_BYTES, SAMPLE_BBOX, TMS_CAPABILITIES, TMS_TILE_MAP, WMTS_CAPABILITIES,
};

const UPSTREAM: &str = "https://data.geopf.fr/wms-r/wms";
const WMTS_CAPS_URL: &str =
    "https://data.geopf.fr/wmts?SERVICE=WMTS&VERSION=1.0.0&REQUEST=GetCapabilities";

fn app(fetcher: Arc<ScriptedFetcher>) -> Router {
    let state = AppState::with_backends(
        ServiceConfig::default(),
        Arc::new(MemoryByteStore::new()),
        fetcher,
    );
    let prometheus = PrometheusBuilder::new().build_recorder().handle();
    router(Arc::new(state), prometheus)
}

fn getmap_uri(width: u32, format: &str) -> String {
    format!(
        "/wms?SERVICE=WMS&VERSION=1.3.0&REQUEST=GetMap&LAYERS=cartesIGN&STYLES=\
         &CRS=EPSG:3857&BBOX={SAMPLE_BBOX}&WIDTH={width}&HEIGHT={width}\
         &FORMAT={format}&TRANSPARENT=true"
    )
}

async fn send(app: Router, method: &str, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::HOST, "geoapi.fr")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, body.to_vec())
}

#[tokio::test]
async fn test_getmap_relays_coarsest_layer() {
    let fetcher = Arc::new(ScriptedFetcher::new().respond_to_all(PNG_BYTES));
    let (status, content_type, body) =
        send(app(fetcher.clone()), "GET", &getmap_uri(1024, "image/png")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("image/png"));
    assert_eq!(body, PNG_BYTES);

    let requests = fetcher.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].starts_with(UPSTREAM));
    assert!(requests[0].contains("LAYERS=SCAN1000_PYR-JPEG_WLD_WM"));
    assert!(requests[0].contains(&format!("BBOX={}", urlencoding::encode(SAMPLE_BBOX))));
}

#[tokio::test]
async fn test_crs_cannot_inject_upstream_layer() {
    let fetcher = Arc::new(ScriptedFetcher::new().respond_to_all(PNG_BYTES));
    let uri = format!(
        "/wms?SERVICE=WMS&VERSION=1.3.0&REQUEST=GetMap&LAYERS=cartesIGN&STYLES=\
         &CRS=EPSG:3857%26LAYERS%3DORTHO_SECRET&BBOX={SAMPLE_BBOX}&WIDTH=1024&HEIGHT=1024\
         &FORMAT=image/png"
    );
    let (status, _, _) = send(app(fetcher.clone()), "GET", &uri).await;
    assert_eq!(status, StatusCode::OK);

    let requests = fetcher.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].matches("LAYERS=").count(), 1);
    assert!(requests[0].contains("LAYERS=SCAN1000_PYR-JPEG_WLD_WM"));
    assert!(!requests[0].contains("&LAYERS=ORTHO_SECRET"));
}

#[tokio::test]
async fn test_jpeg_content_type_follows_request() {
    let fetcher = Arc::new(ScriptedFetcher::new().respond_to_all(&b"\xFF\xD8\xFF"[..]));
    let (status, content_type, _) =
        send(app(fetcher), "GET", &getmap_uri(1024, "image/jpeg")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("image/jpeg"));
}

#[tokio::test]
async fn test_too_coarse_scale_is_client_error() {
    let fetcher = Arc::new(ScriptedFetcher::new().respond_to_all(PNG_BYTES));
    let (status, _, body) = send(app(fetcher.clone()), "GET", &getmap_uri(512, "image/png")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let report = String::from_utf8(body).unwrap();
    assert!(report.contains("ServiceExceptionReport"));
    assert!(report.contains("2_183_915"));
    assert!(report.contains("zoom 8"));
    assert_eq!(fetcher.request_count(), 0);
}

#[tokio::test]
async fn test_gif_is_rejected_without_fetch() {
    let fetcher = Arc::new(ScriptedFetcher::new().respond_to_all(PNG_BYTES));
    let (status, _, body) = send(app(fetcher.clone()), "GET", &getmap_uri(1024, "image/gif")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(String::from_utf8(body).unwrap().contains("InvalidFormat"));
    assert_eq!(fetcher.request_count(), 0);
}

#[tokio::test]
async fn test_upstream_failure_names_url() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    let (status, _, body) = send(app(fetcher.clone()), "GET", &getmap_uri(1024, "image/png")).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let report = String::from_utf8(body).unwrap();
    assert!(report.contains(UPSTREAM));
    // Not retried.
    assert_eq!(fetcher.request_count(), 1);
}

#[tokio::test]
async fn test_proxy_capabilities_online_resource() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    let request = Request::builder()
        .uri("/wms?SERVICE=WMS&REQUEST=GetCapabilities")
        .header(header::HOST, "geoapi.fr")
        .header("x-forwarded-proto", "https")
        .body(Body::empty())
        .unwrap();
    let response = app(fetcher).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let xml = String::from_utf8(body.to_vec()).unwrap();
    assert!(xml.contains(r#"xlink:href="https://geoapi.fr/wms?""#));
    assert!(xml.contains("<Name>cartesIGN</Name>"));
}

#[tokio::test]
async fn test_missing_service_parameter() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    let (status, _, body) = send(app(fetcher), "GET", "/wms?REQUEST=GetMap").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(String::from_utf8(body).unwrap().contains("MissingParameterValue"));
}

#[tokio::test]
async fn test_list_layers_and_tile_source() {
    let fetcher = Arc::new(ScriptedFetcher::new().respond(WMTS_CAPS_URL, WMTS_CAPABILITIES));
    let app = app(fetcher.clone());

    let (status, _, body) = send(app.clone(), "GET", "/api/servers/wmts/layers").await;
    assert_eq!(status, StatusCode::OK);
    let layers: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(layers.as_array().unwrap().len(), 3);
    assert_eq!(layers[0]["name"], "HR.ORTHOIMAGERY.ORTHOPHOTOS");

    let (status, _, body) = send(
        app.clone(),
        "GET",
        "/api/servers/wmts/layers/PLAN-IGN_PNG/tile-source?style=classique",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let source: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(source["protocol"], "WMTS");
    assert_eq!(source["style"], "classique");
    assert_eq!(source["min_zoom"], 0);
    assert_eq!(source["max_zoom"], 18);

    // The second call is served from the cache.
    assert_eq!(fetcher.request_count(), 1);
}

#[tokio::test]
async fn test_unknown_server_and_layer() {
    let fetcher = Arc::new(ScriptedFetcher::new().respond(WMTS_CAPS_URL, WMTS_CAPABILITIES));
    let app = app(fetcher);

    let (status, _, _) = send(app.clone(), "GET", "/api/servers/wfs/layers").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, body) = send(app, "GET", "/api/servers/wmts/layers/NOPE").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["kind"], "unknown_layer");
}

#[tokio::test]
async fn test_tms_layer_doc_is_fetched() {
    let fetcher = Arc::new(
        ScriptedFetcher::new()
            .respond("https://data.geopf.fr/tms/1.0.0", TMS_CAPABILITIES)
            .respond("https://data.geopf.fr/tms/1.0.0/PCI", TMS_TILE_MAP),
    );
    let (status, content_type, body) =
        send(app(fetcher), "GET", "/api/servers/tms/layers/PCI/doc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("text/xml"));
    assert_eq!(body, TMS_TILE_MAP.as_bytes());
}

#[tokio::test]
async fn test_cache_clear_reports_outcome() {
    let fetcher = Arc::new(ScriptedFetcher::new().respond(WMTS_CAPS_URL, WMTS_CAPABILITIES));
    let app = app(fetcher.clone());

    let (_, _, body) = send(app.clone(), "POST", "/api/servers/wmts/cache/clear").await;
    assert_eq!(body, br#"{"status":"absent"}"#);

    let (status, content_type, _) = send(app.clone(), "GET", "/api/servers/wmts/capabilities").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/xml"));

    let (status, _, body) = send(app.clone(), "POST", "/api/servers/wmts/cache/clear").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, br#"{"status":"ok"}"#);

    send(app, "GET", "/api/servers/wmts/capabilities").await;
    assert_eq!(fetcher.request_count(), 2);
}

#[tokio::test]
async fn test_servers_listing_resolves_placeholder() {
    let (status, _, body) = send(app(Arc::new(ScriptedFetcher::new())), "GET", "/api/servers").await;
    assert_eq!(status, StatusCode::OK);
    let servers: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let pwms = servers
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["id"] == "pWms")
        .unwrap();
    assert_eq!(pwms["url"], "https://geoapi.fr/gpf/pwms.php");
    assert_eq!(pwms["protocol"], "WMS");
}
