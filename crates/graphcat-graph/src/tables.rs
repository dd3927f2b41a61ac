//! Table CRUD operations.

use graphcat_core::{generate_id, sanitize, CatalogError, CatalogResult};

use crate::store::{first_node, GraphQuery, GraphStore, Record};

/// Create a Table node with its sanitized dynamic properties.
///
/// Returns the core fields merged with every accepted dynamic property.
pub async fn create_table(
    store: &dyn GraphStore,
    name: &str,
    dynamic_properties: &serde_json::Map<String, serde_json::Value>,
) -> CatalogResult<Record> {
    let table_id = generate_id();
    let props = sanitize(dynamic_properties);

    let query = GraphQuery::new(
        "CREATE (t:Table {name: $name, table_id: $table_id})
         SET t += $dynamic_properties
         RETURN t.table_id AS table_id, t.name AS name",
    )
    .param("name", name)
    .param("table_id", table_id.as_str())
    .param("dynamic_properties", props.clone());

    let rows = store.run(query).await?;
    let Some(row) = rows.into_iter().next() else {
        return Err(CatalogError::CreationFailed("table".into()));
    };

    let mut body = Record::new();
    body.insert(
        "table_id".into(),
        row.get("table_id").cloned().unwrap_or_default(),
    );
    body.insert("name".into(), row.get("name").cloned().unwrap_or_default());
    for (key, value) in &props {
        body.insert(key.clone(), value.to_json());
    }
    Ok(body)
}

/// Fetch a Table node by id, with all of its properties.
pub async fn get_table(store: &dyn GraphStore, table_id: &str) -> CatalogResult<Record> {
    let query = GraphQuery::new("MATCH (t:Table {table_id: $table_id}) RETURN t")
        .param("table_id", table_id);

    let rows = store.run(query).await?;
    first_node(rows, "t").ok_or_else(|| CatalogError::not_found("table"))
}

/// Delete a Table node by id.
///
/// Owned Column and Rule nodes are not cascaded; they are left orphaned.
/// A DELETE returning rows would be anomalous, so a non-empty result is
/// the failure case here.
pub async fn delete_table(store: &dyn GraphStore, table_id: &str) -> CatalogResult<()> {
    let query = GraphQuery::new("MATCH (t:Table {table_id: $table_id}) DELETE t")
        .param("table_id", table_id);

    let rows = store.run(query).await?;
    if !rows.is_empty() {
        return Err(CatalogError::DeletionFailed("table".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{record, StubStore};
    use serde_json::json;

    fn props(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
        value.as_object().unwrap().clone()
    }

    #[tokio::test]
    async fn test_create_table_merges_accepted_properties() {
        let store = StubStore::returning(vec![record(
            json!({"table_id": "id-1", "name": "Products"}),
        )]);

        let body = create_table(
            &store,
            "Products",
            &props(json!({"no_of_colums": 4, "nested": {"x": 1}})),
        )
        .await
        .unwrap();

        assert_eq!(body["table_id"], json!("id-1"));
        assert_eq!(body["name"], json!("Products"));
        assert_eq!(body["no_of_colums"], json!(4));
        assert!(!body.contains_key("nested"));

        let queries = store.queries();
        assert_eq!(queries.len(), 1);
        assert!(queries[0].cypher.contains("CREATE (t:Table"));
        assert_eq!(queries[0].string_param("name"), Some("Products"));
    }

    #[tokio::test]
    async fn test_create_table_fails_on_empty_result() {
        let store = StubStore::returning(vec![]);
        let err = create_table(&store, "Products", &props(json!({})))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::CreationFailed(_)));
    }

    #[tokio::test]
    async fn test_get_table_returns_full_node() {
        let store = StubStore::returning(vec![record(json!({
            "t": {"table_id": "id-1", "name": "Products", "no_of_colums": 4}
        }))]);

        let node = get_table(&store, "id-1").await.unwrap();
        assert_eq!(node["name"], json!("Products"));
        assert_eq!(node["no_of_colums"], json!(4));
    }

    #[tokio::test]
    async fn test_get_table_not_found() {
        let store = StubStore::returning(vec![]);
        let err = get_table(&store, "missing").await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_table_empty_result_is_success() {
        let store = StubStore::returning(vec![]);
        assert!(delete_table(&store, "id-1").await.is_ok());

        // Plain DELETE, not DETACH DELETE: owned Columns and Rules are
        // deliberately left behind as orphans.
        let queries = store.queries();
        assert!(queries[0].cypher.contains("DELETE t"));
        assert!(!queries[0].cypher.contains("DETACH"));
    }

    #[tokio::test]
    async fn test_delete_table_rows_mean_failure() {
        let store = StubStore::returning(vec![record(json!({"t": {}}))]);
        let err = delete_table(&store, "id-1").await.unwrap_err();
        assert!(matches!(err, CatalogError::DeletionFailed(_)));
    }
}
