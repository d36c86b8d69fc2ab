//! HTTP request handlers.
//!
//! - `wms`: the WMS proxy endpoint (GetCapabilities, GetMap)
//! - `api`: JSON browsing of servers, layers and tile sources
//! - `cache`: capability cache invalidation
//! - `metrics`: health check and Prometheus metrics
//! - `common`: exception reports and error responses

pub mod api;
pub mod cache;
pub mod common;
pub mod metrics;
pub mod wms;

pub use api::{
    capabilities_handler, layer_doc_handler, layer_handler, layers_handler, servers_handler,
    tile_source_handler,
};
pub use cache::cache_clear_handler;
pub use common::{wms_exception, ApiError, ApiResult};
pub use metrics::{health_handler, metrics_handler};
pub use wms::wms_handler;
