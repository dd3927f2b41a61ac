//! Search route handlers.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use graphcat_graph::search::{self, SearchResponse};

use crate::error::{internal, ApiError};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub keyword: String,
}

pub async fn search_nodes(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    search::search_nodes(state.graph.as_ref(), &params.keyword)
        .await
        .map(Json)
        .map_err(internal)
}

pub async fn search_tables_with_rules(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    search::search_tables_with_rules(state.graph.as_ref(), &params.keyword)
        .await
        .map(Json)
        .map_err(internal)
}
