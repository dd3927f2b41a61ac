//! Metadata pipeline route handlers: extraction, persistence, and node
//! property updates.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use uuid::Uuid;

use graphcat_core::{CatalogError, SchemaTree};
use graphcat_graph::metadata;

use crate::error::{detail, internal, ApiError};
use crate::state::AppState;

pub async fn extract_metadata(
    State(state): State<AppState>,
    Path(database): Path<String>,
) -> Result<Json<SchemaTree>, ApiError> {
    graphcat_warehouse::extract_metadata(state.warehouse.as_ref(), &database)
        .await
        .map(Json)
        .map_err(internal)
}

pub async fn persist_metadata(
    State(state): State<AppState>,
    Path(database): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let tree = graphcat_warehouse::extract_metadata(state.warehouse.as_ref(), &database)
        .await
        .map_err(internal)?;

    graphcat_graph::synchronize(state.graph.as_ref(), &database, &tree)
        .await
        .map_err(internal)?;

    Ok(Json(json!({"message": "Metadata persisted successfully"})))
}

pub async fn add_metadata(
    State(state): State<AppState>,
    Path(node_id): Path<Uuid>,
    Json(properties): Json<serde_json::Map<String, serde_json::Value>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let node =
        metadata::update_node_properties(state.graph.as_ref(), &node_id.to_string(), &properties)
            .await
            .map_err(|e| match e {
                CatalogError::NotFound(_) => detail(StatusCode::NOT_FOUND, "Node not found"),
                other => internal(other),
            })?;

    Ok(Json(json!({
        "message": "Node properties updated successfully",
        "node": node
    })))
}
