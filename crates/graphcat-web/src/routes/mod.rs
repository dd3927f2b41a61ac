//! Route handlers.

pub mod columns;
pub mod metadata;
pub mod rules;
pub mod search;
pub mod tables;
pub mod warehouse;

use axum::Json;
use serde_json::json;

pub async fn root() -> Json<serde_json::Value> {
    Json(json!({"message": "Graphcat metadata catalog is ready"}))
}
