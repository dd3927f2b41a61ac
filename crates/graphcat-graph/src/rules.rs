//! Rule CRUD operations.
//!
//! Mirrors the Column operations with a `rule_of` ownership relationship.

use graphcat_core::{generate_id, sanitize, CatalogError, CatalogResult};

use crate::store::{first_node, node_list, GraphQuery, GraphStore, Record};

/// Create a Rule node under an existing Table.
pub async fn create_rule(
    store: &dyn GraphStore,
    table_id: &str,
    name: &str,
    contextual_description: &str,
    dynamic_properties: &serde_json::Map<String, serde_json::Value>,
) -> CatalogResult<Record> {
    let rule_id = generate_id();
    let props = sanitize(dynamic_properties);

    let query = GraphQuery::new(
        "MATCH (t:Table {table_id: $table_id})
         CREATE (t)<-[:rule_of]-(r:Rule {name: $name, rule_id: $rule_id, contextual_description: $contextual_description})
         SET r += $dynamic_properties
         RETURN r.rule_id AS rule_id, r.name AS name, r.contextual_description AS contextual_description",
    )
    .param("table_id", table_id)
    .param("name", name)
    .param("rule_id", rule_id.as_str())
    .param("contextual_description", contextual_description)
    .param("dynamic_properties", props.clone());

    let rows = store.run(query).await?;
    let Some(row) = rows.into_iter().next() else {
        return Err(CatalogError::CreationFailed("rule".into()));
    };

    let mut body = Record::new();
    for field in ["rule_id", "name", "contextual_description"] {
        body.insert(field.into(), row.get(field).cloned().unwrap_or_default());
    }
    for (key, value) in &props {
        body.insert(key.clone(), value.to_json());
    }
    Ok(body)
}

/// List every Rule owned by a Table. Empty results report NotFound, same
/// policy as [`crate::columns::list_columns`].
pub async fn list_rules(store: &dyn GraphStore, table_id: &str) -> CatalogResult<Vec<Record>> {
    let query =
        GraphQuery::new("MATCH (r:Rule)-[:rule_of]->(t:Table {table_id: $table_id}) RETURN r")
            .param("table_id", table_id);

    let rows = store.run(query).await?;
    if rows.is_empty() {
        return Err(CatalogError::not_found("rules"));
    }
    Ok(node_list(rows, "r"))
}

/// Fetch one Rule by id, scoped to its owning Table.
pub async fn get_rule(
    store: &dyn GraphStore,
    table_id: &str,
    rule_id: &str,
) -> CatalogResult<Record> {
    let query = GraphQuery::new(
        "MATCH (r:Rule {rule_id: $rule_id})-[:rule_of]->(t:Table {table_id: $table_id}) RETURN r",
    )
    .param("rule_id", rule_id)
    .param("table_id", table_id);

    let rows = store.run(query).await?;
    first_node(rows, "r").ok_or_else(|| CatalogError::not_found("rule"))
}

/// Delete a Rule: ownership edge first, then the node.
pub async fn delete_rule(
    store: &dyn GraphStore,
    table_id: &str,
    rule_id: &str,
) -> CatalogResult<()> {
    let edge = GraphQuery::new(
        "MATCH (t:Table {table_id: $table_id})<-[e:rule_of]-(r:Rule {rule_id: $rule_id}) DELETE e",
    )
    .param("table_id", table_id)
    .param("rule_id", rule_id);
    store.run(edge).await?;

    let node =
        GraphQuery::new("MATCH (r:Rule {rule_id: $rule_id}) DELETE r").param("rule_id", rule_id);

    let rows = store.run(node).await?;
    if !rows.is_empty() {
        return Err(CatalogError::DeletionFailed("rule".into()));
    }
    Ok(())
}
