//! The graph store seam.
//!
//! Catalog operations are written against [`GraphStore`], a thin
//! parameterized-query contract, rather than against the driver directly.
//! [`crate::client::GraphClient`] is the Neo4j implementation; tests use
//! in-memory fakes.

use std::collections::BTreeMap;

use async_trait::async_trait;
use graphcat_core::{CatalogResult, PropertyValue};

/// One result row, keyed by the query's return column names. Columns that
/// return nodes materialize as the node's property map; columns that
/// collect nodes materialize as arrays of property maps.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// A query parameter: either a single sanitized value or a property map
/// (for `SET n += $props` merges).
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Value(PropertyValue),
    Map(BTreeMap<String, PropertyValue>),
}

impl From<PropertyValue> for ParamValue {
    fn from(value: PropertyValue) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Value(PropertyValue::String(value.to_string()))
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Value(PropertyValue::String(value))
    }
}

impl From<BTreeMap<String, PropertyValue>> for ParamValue {
    fn from(map: BTreeMap<String, PropertyValue>) -> Self {
        Self::Map(map)
    }
}

/// A parameterized Cypher query.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphQuery {
    pub cypher: String,
    pub params: BTreeMap<String, ParamValue>,
}

impl GraphQuery {
    pub fn new(cypher: impl Into<String>) -> Self {
        Self {
            cypher: cypher.into(),
            params: BTreeMap::new(),
        }
    }

    pub fn param(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    /// Fetch a string parameter, for fakes and assertions.
    pub fn string_param(&self, key: &str) -> Option<&str> {
        match self.params.get(key)? {
            ParamValue::Value(PropertyValue::String(s)) => Some(s),
            _ => None,
        }
    }
}

/// Pull the node object out of the first row's given return column.
pub(crate) fn first_node(rows: Vec<Record>, column: &str) -> Option<Record> {
    match rows.into_iter().next()?.remove(column)? {
        serde_json::Value::Object(node) => Some(node),
        _ => None,
    }
}

/// Pull the node object out of every row's given return column.
pub(crate) fn node_list(rows: Vec<Record>, column: &str) -> Vec<Record> {
    rows.into_iter()
        .filter_map(|mut row| match row.remove(column) {
            Some(serde_json::Value::Object(node)) => Some(node),
            _ => None,
        })
        .collect()
}

/// Synchronous-in-spirit transaction wrapper around the graph store: runs
/// one parameterized query in a scoped session, materializes every result
/// row before returning, and releases the session on all exit paths.
#[async_trait]
pub trait GraphStore: Send + Sync {
    async fn run(&self, query: GraphQuery) -> CatalogResult<Vec<Record>>;
}
