//! Capability cache management.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    Json,
};
use tracing::{info, instrument};

use super::common::ApiResult;
use crate::state::AppState;

/// POST /api/servers/:id/cache/clear - drop a server's cached document
#[instrument(skip(state))]
pub async fn cache_clear_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(server_id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    let outcome = state.catalog.invalidate(&server_id).await?;
    info!(server = %server_id, status = outcome.as_str(), "Capability cache cleared");
    Ok(Json(serde_json::json!({ "status": outcome })))
}
