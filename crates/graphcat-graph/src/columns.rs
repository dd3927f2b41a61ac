//! Column CRUD operations.
//!
//! A Column always belongs to exactly one Table through a `column_of`
//! relationship. Creation matches the parent and creates the node plus
//! the relationship in a single statement, so a missing parent makes the
//! whole write come back empty.

use graphcat_core::{generate_id, sanitize, CatalogError, CatalogResult};

use crate::store::{first_node, node_list, GraphQuery, GraphStore, Record};

/// Create a Column node under an existing Table.
pub async fn create_column(
    store: &dyn GraphStore,
    table_id: &str,
    name: &str,
    contextual_description: &str,
    dynamic_properties: &serde_json::Map<String, serde_json::Value>,
) -> CatalogResult<Record> {
    let column_id = generate_id();
    let props = sanitize(dynamic_properties);

    let query = GraphQuery::new(
        "MATCH (t:Table {table_id: $table_id})
         CREATE (t)<-[:column_of]-(c:Column {name: $name, column_id: $column_id, contextual_description: $contextual_description})
         SET c += $dynamic_properties
         RETURN c.column_id AS column_id, c.name AS name, c.contextual_description AS contextual_description",
    )
    .param("table_id", table_id)
    .param("name", name)
    .param("column_id", column_id.as_str())
    .param("contextual_description", contextual_description)
    .param("dynamic_properties", props.clone());

    let rows = store.run(query).await?;
    let Some(row) = rows.into_iter().next() else {
        return Err(CatalogError::CreationFailed("column".into()));
    };

    let mut body = Record::new();
    for field in ["column_id", "name", "contextual_description"] {
        body.insert(field.into(), row.get(field).cloned().unwrap_or_default());
    }
    for (key, value) in &props {
        body.insert(key.clone(), value.to_json());
    }
    Ok(body)
}

/// List every Column owned by a Table, in store-native order.
///
/// An empty result is reported as NotFound: a parent with no children is
/// indistinguishable from an absent parent here. Kept for compatibility
/// with the existing API contract.
pub async fn list_columns(store: &dyn GraphStore, table_id: &str) -> CatalogResult<Vec<Record>> {
    let query = GraphQuery::new(
        "MATCH (c:Column)-[:column_of]->(t:Table {table_id: $table_id}) RETURN c",
    )
    .param("table_id", table_id);

    let rows = store.run(query).await?;
    if rows.is_empty() {
        return Err(CatalogError::not_found("columns"));
    }
    Ok(node_list(rows, "c"))
}

/// Fetch one Column by id, scoped to its owning Table.
pub async fn get_column(
    store: &dyn GraphStore,
    table_id: &str,
    column_id: &str,
) -> CatalogResult<Record> {
    let query = GraphQuery::new(
        "MATCH (c:Column {column_id: $column_id})-[:column_of]->(t:Table {table_id: $table_id}) RETURN c",
    )
    .param("column_id", column_id)
    .param("table_id", table_id);

    let rows = store.run(query).await?;
    first_node(rows, "c").ok_or_else(|| CatalogError::not_found("column"))
}

/// Delete a Column: ownership edge first, then the node. The two steps
/// are separate statements and are not atomic with respect to concurrent
/// writers.
pub async fn delete_column(
    store: &dyn GraphStore,
    table_id: &str,
    column_id: &str,
) -> CatalogResult<()> {
    let edge = GraphQuery::new(
        "MATCH (t:Table {table_id: $table_id})<-[r:column_of]-(c:Column {column_id: $column_id}) DELETE r",
    )
    .param("table_id", table_id)
    .param("column_id", column_id);
    store.run(edge).await?;

    let node = GraphQuery::new("MATCH (c:Column {column_id: $column_id}) DELETE c")
        .param("column_id", column_id);

    let rows = store.run(node).await?;
    if !rows.is_empty() {
        return Err(CatalogError::DeletionFailed("column".into()));
    }
    Ok(())
}
