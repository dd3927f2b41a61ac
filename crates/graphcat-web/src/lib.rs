//! # Graphcat Web
//!
//! Axum HTTP surface for the metadata catalog.

pub mod error;
pub mod routes;
pub mod state;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::root))
        // Tables
        .route("/tables/", post(routes::tables::create_table))
        .route(
            "/tables/{table_id}",
            get(routes::tables::get_table).delete(routes::tables::delete_table),
        )
        // Columns
        .route(
            "/columns/{table_id}",
            post(routes::columns::create_column).get(routes::columns::list_columns),
        )
        .route(
            "/columns/{table_id}/{column_id}",
            get(routes::columns::get_column).delete(routes::columns::delete_column),
        )
        // Rules
        .route(
            "/rules/{table_id}",
            post(routes::rules::create_rule).get(routes::rules::list_rules),
        )
        .route(
            "/rules/{table_id}/{rule_id}",
            get(routes::rules::get_rule).delete(routes::rules::delete_rule),
        )
        // Metadata pipeline
        .route("/extract-metadata/{database}", get(routes::metadata::extract_metadata))
        .route("/persist-metadata/{database}", post(routes::metadata::persist_metadata))
        .route("/add_metadata/{node_id}", put(routes::metadata::add_metadata))
        // Search
        .route("/search-nodes/", get(routes::search::search_nodes))
        .route(
            "/search-tables-with-rules",
            get(routes::search::search_tables_with_rules),
        )
        // Warehouse passthroughs
        .route("/warehouse/databases", get(routes::warehouse::databases))
        .route("/warehouse/schemas/{database}", get(routes::warehouse::schemas))
        .route(
            "/warehouse/tables/{database}/{schema}",
            get(routes::warehouse::tables),
        )
        .route(
            "/warehouse/columns/{database}/{schema}/{table}",
            get(routes::warehouse::columns),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server.
pub async fn run_server(state: AppState, port: u16) -> anyhow::Result<()> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!("Catalog API listening on http://127.0.0.1:{}", port);

    axum::serve(listener, app).await?;
    Ok(())
}
