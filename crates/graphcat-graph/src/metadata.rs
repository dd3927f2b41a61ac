//! Property updates on arbitrary catalog nodes.

use graphcat_core::{sanitize, CatalogError, CatalogResult};

use crate::store::{first_node, GraphQuery, GraphStore, Record};

/// Merge user-supplied properties onto the node carrying the given
/// `custom_id`. Properties pass through the dynamic property filter
/// before the merge. Returns the updated node.
pub async fn update_node_properties(
    store: &dyn GraphStore,
    node_id: &str,
    properties: &serde_json::Map<String, serde_json::Value>,
) -> CatalogResult<Record> {
    let props = sanitize(properties);

    let query = GraphQuery::new(
        "MATCH (n)
         WHERE n.custom_id = $custom_id
         SET n += $properties
         RETURN n",
    )
    .param("custom_id", node_id)
    .param("properties", props);

    let rows = store.run(query).await?;
    first_node(rows, "n").ok_or_else(|| CatalogError::not_found("node"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{record, StubStore};
    use serde_json::json;

    #[tokio::test]
    async fn test_update_returns_updated_node() {
        let store = StubStore::returning(vec![record(json!({
            "n": {"custom_id": "id-1", "name": "PUBLIC", "owner": "ops"}
        }))]);

        let props = json!({"owner": "ops"}).as_object().unwrap().clone();
        let node = update_node_properties(&store, "id-1", &props).await.unwrap();
        assert_eq!(node["owner"], json!("ops"));
    }

    #[tokio::test]
    async fn test_update_missing_node_is_not_found() {
        let store = StubStore::returning(vec![]);
        let props = serde_json::Map::new();
        let err = update_node_properties(&store, "missing", &props)
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }
}
