//! Graphcat server binary.
//!
//! Connects to Neo4j and the warehouse, then serves the catalog API.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use graphcat_graph::{GraphClient, GraphConfig};
use graphcat_warehouse::{SnowflakeClient, WarehouseConfig};
use graphcat_web::state::AppState;

#[derive(Parser)]
#[command(name = "graphcat", about = "Graph-backed metadata catalog service")]
struct Cli {
    /// Port to listen on.
    #[arg(long, env = "GRAPHCAT_PORT", default_value_t = 8000)]
    port: u16,

    /// Neo4j bolt URI.
    #[arg(long, env = "NEO4J_URI", default_value = "bolt://localhost:7687")]
    graph_uri: String,

    #[arg(long, env = "NEO4J_USER", default_value = "neo4j")]
    graph_user: String,

    #[arg(long, env = "NEO4J_PASSWORD")]
    graph_password: String,

    /// Snowflake account locator, e.g. xy12345.us-east-1.
    #[arg(long, env = "SNOWFLAKE_ACCOUNT")]
    warehouse_account: String,

    #[arg(long, env = "SNOWFLAKE_USER")]
    warehouse_user: String,

    /// Programmatic access token for the Snowflake SQL API.
    #[arg(long, env = "SNOWFLAKE_TOKEN")]
    warehouse_token: String,
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "graphcat=info,tower_http=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let graph_config = GraphConfig {
        uri: cli.graph_uri,
        user: cli.graph_user,
        password: cli.graph_password,
    };
    let graph = GraphClient::connect(&graph_config).await?;
    tracing::info!(uri = %graph_config.uri, "Connected to Neo4j");

    let warehouse = SnowflakeClient::new(&WarehouseConfig {
        account: cli.warehouse_account,
        user: cli.warehouse_user,
        token: cli.warehouse_token,
    });

    let state = AppState::new(Arc::new(graph), Arc::new(warehouse));
    graphcat_web::run_server(state, cli.port).await
}
