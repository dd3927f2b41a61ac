//! Column route handlers.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use graphcat_graph::{columns, Record};

use crate::error::{bad_request, ApiError};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ColumnRequest {
    pub name: String,
    pub contextual_description: String,
    #[serde(default)]
    pub dynamic_properties: serde_json::Map<String, serde_json::Value>,
}

pub async fn create_column(
    State(state): State<AppState>,
    Path(table_id): Path<Uuid>,
    Json(req): Json<ColumnRequest>,
) -> Result<Json<Record>, ApiError> {
    columns::create_column(
        state.graph.as_ref(),
        &table_id.to_string(),
        &req.name,
        &req.contextual_description,
        &req.dynamic_properties,
    )
    .await
    .map(Json)
    .map_err(bad_request)
}

pub async fn list_columns(
    State(state): State<AppState>,
    Path(table_id): Path<Uuid>,
) -> Result<Json<Vec<Record>>, ApiError> {
    columns::list_columns(state.graph.as_ref(), &table_id.to_string())
        .await
        .map(Json)
        .map_err(bad_request)
}

pub async fn get_column(
    State(state): State<AppState>,
    Path((table_id, column_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Record>, ApiError> {
    columns::get_column(
        state.graph.as_ref(),
        &table_id.to_string(),
        &column_id.to_string(),
    )
    .await
    .map(Json)
    .map_err(bad_request)
}

pub async fn delete_column(
    State(state): State<AppState>,
    Path((table_id, column_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Vec<Record>>, ApiError> {
    columns::delete_column(
        state.graph.as_ref(),
        &table_id.to_string(),
        &column_id.to_string(),
    )
    .await
    .map(|_| Json(Vec::new()))
    .map_err(bad_request)
}
