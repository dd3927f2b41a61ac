//! Table route handlers.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use graphcat_graph::{tables, Record};

use crate::error::{bad_request, ApiError};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct TableRequest {
    pub name: String,
    #[serde(default)]
    pub dynamic_properties: serde_json::Map<String, serde_json::Value>,
}

pub async fn create_table(
    State(state): State<AppState>,
    Json(req): Json<TableRequest>,
) -> Result<Json<Record>, ApiError> {
    tables::create_table(state.graph.as_ref(), &req.name, &req.dynamic_properties)
        .await
        .map(Json)
        .map_err(bad_request)
}

pub async fn get_table(
    State(state): State<AppState>,
    Path(table_id): Path<Uuid>,
) -> Result<Json<Record>, ApiError> {
    tables::get_table(state.graph.as_ref(), &table_id.to_string())
        .await
        .map(Json)
        .map_err(bad_request)
}

pub async fn delete_table(
    State(state): State<AppState>,
    Path(table_id): Path<Uuid>,
) -> Result<Json<Vec<Record>>, ApiError> {
    tables::delete_table(state.graph.as_ref(), &table_id.to_string())
        .await
        .map(|_| Json(Vec::new()))
        .map_err(bad_request)
}
