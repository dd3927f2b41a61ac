//! Keyword search over the property graph.
//!
//! Matching is a case-insensitive substring test against the stringified
//! form of every property, so numeric and boolean properties match on
//! their textual rendering and an empty keyword matches every node.

use serde::Serialize;

use graphcat_core::CatalogResult;

use crate::store::{GraphQuery, GraphStore};

/// Search result envelope returned to the API.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub message: String,
    pub nodes: Vec<serde_json::Value>,
}

/// Scan every node for a property whose string form contains the keyword.
/// Returns full property snapshots of the matches.
pub async fn search_nodes(store: &dyn GraphStore, keyword: &str) -> CatalogResult<SearchResponse> {
    let query = GraphQuery::new(
        "MATCH (n)
         WHERE any(property IN keys(n)
                   WHERE toLower(toString(n[property])) CONTAINS toLower($keyword))
         RETURN n",
    )
    .param("keyword", keyword.to_lowercase());

    let rows = store.run(query).await?;
    if rows.is_empty() {
        return Ok(SearchResponse {
            message: "No nodes found matching the keyword".to_string(),
            nodes: Vec::new(),
        });
    }

    let nodes = rows
        .into_iter()
        .filter_map(|mut row| row.remove("n"))
        .collect();

    Ok(SearchResponse {
        message: "Nodes found".to_string(),
        nodes,
    })
}

/// Restrict the keyword match to Table nodes, then join each match to its
/// Rule nodes through `rule_of`. A Table with no rules still appears,
/// with an empty rule list (`collect` over an optional match skips nulls).
pub async fn search_tables_with_rules(
    store: &dyn GraphStore,
    keyword: &str,
) -> CatalogResult<SearchResponse> {
    let query = GraphQuery::new(
        "MATCH (t:Table)
         WHERE any(property IN keys(t)
                   WHERE toLower(toString(t[property])) CONTAINS toLower($keyword))
         OPTIONAL MATCH (r:Rule)-[:rule_of]->(t)
         RETURN t, collect(r) AS rules",
    )
    .param("keyword", keyword.to_lowercase());

    let rows = store.run(query).await?;
    if rows.is_empty() {
        return Ok(SearchResponse {
            message: "No matching tables found".to_string(),
            nodes: Vec::new(),
        });
    }

    let nodes = rows
        .into_iter()
        .map(|mut row| {
            let table = row.remove("t").unwrap_or_default();
            let rules = match row.remove("rules") {
                Some(serde_json::Value::Array(rules)) => rules,
                _ => Vec::new(),
            };
            serde_json::json!({"table": table, "rules": rules})
        })
        .collect();

    Ok(SearchResponse {
        message: "Tables and related rules found".to_string(),
        nodes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{record, StubStore};
    use serde_json::json;

    #[tokio::test]
    async fn test_search_nodes_lowercases_keyword() {
        let store = StubStore::returning(vec![record(json!({
            "n": {"name": "Price", "table_id": "t-1"}
        }))]);

        let response = search_nodes(&store, "PRICE").await.unwrap();
        assert_eq!(response.message, "Nodes found");
        assert_eq!(response.nodes, vec![json!({"name": "Price", "table_id": "t-1"})]);

        let queries = store.queries();
        assert_eq!(queries[0].string_param("keyword"), Some("price"));
    }

    #[tokio::test]
    async fn test_search_nodes_empty_result_message() {
        let store = StubStore::returning(vec![]);
        let response = search_nodes(&store, "absent").await.unwrap();
        assert_eq!(response.message, "No nodes found matching the keyword");
        assert!(response.nodes.is_empty());
    }

    #[tokio::test]
    async fn test_empty_keyword_is_passed_through() {
        // An empty keyword is a substring of everything; the query must
        // still run with it rather than being rejected.
        let store = StubStore::returning(vec![
            record(json!({"n": {"name": "a"}})),
            record(json!({"n": {"name": "b"}})),
        ]);

        let response = search_nodes(&store, "").await.unwrap();
        assert_eq!(response.nodes.len(), 2);
        assert_eq!(store.queries()[0].string_param("keyword"), Some(""));
    }

    #[tokio::test]
    async fn test_table_without_rules_keeps_empty_list() {
        let store = StubStore::returning(vec![record(json!({
            "t": {"table_id": "t-1", "name": "Products"},
            "rules": []
        }))]);

        let response = search_tables_with_rules(&store, "products").await.unwrap();
        assert_eq!(
            response.nodes,
            vec![json!({
                "table": {"table_id": "t-1", "name": "Products"},
                "rules": []
            })]
        );
    }

    #[tokio::test]
    async fn test_tables_with_rules_shapes_rows() {
        let store = StubStore::returning(vec![record(json!({
            "t": {"table_id": "t-1", "name": "Products"},
            "rules": [{"rule_id": "r-1", "name": "price"}]
        }))]);

        let response = search_tables_with_rules(&store, "pro").await.unwrap();
        assert_eq!(response.message, "Tables and related rules found");
        assert_eq!(response.nodes[0]["rules"][0]["rule_id"], json!("r-1"));
    }
}
