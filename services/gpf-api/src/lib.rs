//! WMS proxy and capability browser for the geodata platform.
//!
//! The library target exposes the router and its parts so they can be
//! exercised without binding a socket.

pub mod catalog;
pub mod config;
pub mod handlers;
pub mod proxy;
pub mod state;

use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use state::AppState;

/// Build the service router.
pub fn router(state: Arc<AppState>, prometheus: PrometheusHandle) -> Router {
    Router::new()
        // WMS proxy
        .route("/wms", get(handlers::wms_handler))
        .route("/wms/", get(handlers::wms_handler))
        // Capability browsing
        .route("/api/servers", get(handlers::servers_handler))
        .route(
            "/api/servers/:id/capabilities",
            get(handlers::capabilities_handler),
        )
        .route("/api/servers/:id/layers", get(handlers::layers_handler))
        .route(
            "/api/servers/:id/layers/:layer",
            get(handlers::layer_handler),
        )
        .route(
            "/api/servers/:id/layers/:layer/tile-source",
            get(handlers::tile_source_handler),
        )
        .route(
            "/api/servers/:id/layers/:layer/doc",
            get(handlers::layer_doc_handler),
        )
        .route(
            "/api/servers/:id/cache/clear",
            post(handlers::cache_clear_handler),
        )
        // Health and metrics
        .route("/health", get(handlers::health_handler))
        .route("/metrics", get(handlers::metrics_handler))
        .layer(Extension(state))
        .layer(Extension(prometheus))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}
