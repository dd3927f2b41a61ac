//! Warehouse introspection passthrough handlers.

use axum::extract::{Path, State};
use axum::Json;

use graphcat_warehouse::client::SqlRecord;
use graphcat_warehouse::extract;

use crate::error::{internal, ApiError};
use crate::state::AppState;

pub async fn databases(State(state): State<AppState>) -> Result<Json<Vec<SqlRecord>>, ApiError> {
    extract::show_databases(state.warehouse.as_ref())
        .await
        .map(Json)
        .map_err(internal)
}

pub async fn schemas(
    State(state): State<AppState>,
    Path(database): Path<String>,
) -> Result<Json<Vec<SqlRecord>>, ApiError> {
    extract::show_schemas(state.warehouse.as_ref(), &database)
        .await
        .map(Json)
        .map_err(internal)
}

pub async fn tables(
    State(state): State<AppState>,
    Path((database, schema)): Path<(String, String)>,
) -> Result<Json<Vec<SqlRecord>>, ApiError> {
    extract::show_tables(state.warehouse.as_ref(), &database, &schema)
        .await
        .map(Json)
        .map_err(internal)
}

pub async fn columns(
    State(state): State<AppState>,
    Path((database, schema, table)): Path<(String, String, String)>,
) -> Result<Json<Vec<SqlRecord>>, ApiError> {
    extract::show_columns(state.warehouse.as_ref(), &database, &schema, &table)
        .await
        .map(Json)
        .map_err(internal)
}
