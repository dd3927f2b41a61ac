//! Neo4j connection client.

use async_trait::async_trait;
use neo4rs::{BoltBoolean, BoltFloat, BoltInteger, BoltList, BoltMap, BoltString, BoltType, ConfigBuilder, Graph, Query};
use serde::Deserialize;

use graphcat_core::{CatalogError, CatalogResult, PropertyValue};

use crate::store::{GraphQuery, GraphStore, ParamValue, Record};

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: "graphcat_dev".to_string(),
        }
    }
}

/// Client for the Neo4j catalog graph.
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
}

impl GraphClient {
    /// Create a new GraphClient from config.
    ///
    /// neo4rs pools lazily: `Graph::connect` builds the pool without opening
    /// a real bolt connection. The `RETURN 1` ping forces the handshake so an
    /// unreachable Neo4j fails here instead of on the first catalog query.
    pub async fn connect(config: &GraphConfig) -> CatalogResult<Self> {
        let neo4j_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .db("neo4j")
            .max_connections(4)
            .fetch_size(50)
            .build()
            .map_err(|e| CatalogError::GraphUnavailable(e.to_string()))?;

        let graph = Graph::connect(neo4j_config)
            .await
            .map_err(|e| CatalogError::GraphUnavailable(e.to_string()))?;

        graph
            .run(Query::new("RETURN 1".to_string()))
            .await
            .map_err(|e| CatalogError::GraphUnavailable(e.to_string()))?;

        Ok(Self { graph })
    }
}

#[async_trait]
impl GraphStore for GraphClient {
    /// Run one query in a scoped session and materialize every row. The
    /// session goes back to the pool on all exit paths, including errors.
    async fn run(&self, query: GraphQuery) -> CatalogResult<Vec<Record>> {
        let mut cypher = Query::new(query.cypher);
        for (key, value) in &query.params {
            cypher = cypher.param(key.as_str(), bolt_param(value));
        }

        let mut stream = self
            .graph
            .execute(cypher)
            .await
            .map_err(|e| CatalogError::GraphUnavailable(e.to_string()))?;

        let mut records = Vec::new();
        while let Some(row) = stream
            .next()
            .await
            .map_err(|e| CatalogError::GraphUnavailable(e.to_string()))?
        {
            let value: serde_json::Value = row
                .to()
                .map_err(|e| CatalogError::GraphUnavailable(format!("row decode failed: {e}")))?;
            match value {
                serde_json::Value::Object(record) => records.push(record),
                other => {
                    return Err(CatalogError::GraphUnavailable(format!(
                        "unexpected row shape: {other}"
                    )))
                }
            }
        }
        Ok(records)
    }
}

fn bolt_param(value: &ParamValue) -> BoltType {
    match value {
        ParamValue::Value(v) => bolt_value(v),
        ParamValue::Map(map) => {
            let mut bolt = BoltMap::default();
            for (key, v) in map {
                bolt.put(BoltString::new(key), bolt_value(v));
            }
            BoltType::Map(bolt)
        }
    }
}

fn bolt_value(value: &PropertyValue) -> BoltType {
    match value {
        PropertyValue::Bool(b) => BoltType::Boolean(BoltBoolean::new(*b)),
        PropertyValue::Integer(i) => BoltType::Integer(BoltInteger::new(*i)),
        PropertyValue::Float(f) => BoltType::Float(BoltFloat::new(*f)),
        PropertyValue::String(s) => BoltType::String(BoltString::new(s)),
        PropertyValue::List(items) => {
            let mut list = BoltList::default();
            for item in items {
                list.push(bolt_value(item));
            }
            BoltType::List(list)
        }
    }
}
