//! JSON API for browsing the logical servers and their layers.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::{info, instrument};

use gpf_protocol::{Layer, TileSource};

use super::common::{bytes_response, ApiResult};
use crate::catalog::{LayerDoc, ServerSummary};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TileSourceQuery {
    pub style: Option<String>,
}

/// GET /api/servers
pub async fn servers_handler(Extension(state): Extension<Arc<AppState>>) -> Json<Vec<ServerSummary>> {
    Json(state.catalog.servers())
}

/// GET /api/servers/:id/capabilities - pass-through capability document
#[instrument(skip(state))]
pub async fn capabilities_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(server_id): Path<String>,
) -> ApiResult<Response> {
    let document = state.catalog.capability_document(&server_id).await?;
    Ok(bytes_response("application/xml", document))
}

/// GET /api/servers/:id/layers
#[instrument(skip(state))]
pub async fn layers_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(server_id): Path<String>,
) -> ApiResult<Json<Vec<Layer>>> {
    let layers = state.catalog.list_layers(&server_id).await?;
    info!(server = %server_id, count = layers.len(), "Layers request");
    Ok(Json(layers))
}

/// GET /api/servers/:id/layers/:layer
#[instrument(skip(state))]
pub async fn layer_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path((server_id, layer)): Path<(String, String)>,
) -> ApiResult<Json<Layer>> {
    Ok(Json(state.catalog.layer(&server_id, &layer).await?))
}

/// GET /api/servers/:id/layers/:layer/tile-source?style=
#[instrument(skip(state))]
pub async fn tile_source_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path((server_id, layer)): Path<(String, String)>,
    Query(query): Query<TileSourceQuery>,
) -> ApiResult<Json<TileSource>> {
    let source = state
        .catalog
        .tile_source(&server_id, &layer, query.style.as_deref())
        .await?;
    Ok(Json(source))
}

/// GET /api/servers/:id/layers/:layer/doc
#[instrument(skip(state))]
pub async fn layer_doc_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path((server_id, layer)): Path<(String, String)>,
) -> ApiResult<Response> {
    Ok(match state.catalog.layer_doc(&server_id, &layer).await? {
        LayerDoc::Xml(bytes) => bytes_response("text/xml", bytes),
        LayerDoc::Json(layer) => Json(layer).into_response(),
    })
}
