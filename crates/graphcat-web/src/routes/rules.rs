//! Rule route handlers.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use graphcat_graph::{rules, Record};

use crate::error::{bad_request, ApiError};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct RuleRequest {
    pub name: String,
    pub contextual_description: String,
    #[serde(default)]
    pub dynamic_properties: serde_json::Map<String, serde_json::Value>,
}

pub async fn create_rule(
    State(state): State<AppState>,
    Path(table_id): Path<Uuid>,
    Json(req): Json<RuleRequest>,
) -> Result<Json<Record>, ApiError> {
    rules::create_rule(
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

pub async fn list_rules(
    State(state): State<AppState>,
    Path(table_id): Path<Uuid>,
) -> Result<Json<Vec<Record>>, ApiError> {
    rules::list_rules(state.graph.as_ref(), &table_id.to_string())
        .await
        .map(Json)
        .map_err(bad_request)
}

pub async fn get_rule(
    State(state): State<AppState>,
    Path((table_id, rule_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Record>, ApiError> {
    rules::get_rule(
        state.graph.as_ref(),
        &table_id.to_string(),
        &rule_id.to_string(),
    )
    .await
    .map(Json)
    .map_err(bad_request)
}

pub async fn delete_rule(
    State(state): State<AppState>,
    Path((table_id, rule_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Vec<Record>>, ApiError> {
    rules::delete_rule(
        state.graph.as_ref(),
        &table_id.to_string(),
        &rule_id.to_string(),
    )
    .await
    .map(|_| Json(Vec::new()))
    .map_err(bad_request)
}
