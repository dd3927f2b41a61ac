//! Warehouse catalog synchronization.
//!
//! Translates an extracted Database -> Schema -> Table -> Column tree into
//! idempotent upserts against the graph. Every node is merged by its
//! natural key (name within parent scope) together with its `CONTAINS`
//! edge, so re-running against an unchanged warehouse creates nothing
//! new. A fresh `custom_id` candidate is generated per upsert but only
//! persisted through `ON CREATE SET`, which keeps id minting atomic with
//! the existence check: an already-known node never gets a second id.
//!
//! The walk aborts on the first failed upsert; completed upserts are left
//! in place (no rollback).

use graphcat_core::{generate_id, sanitize, CatalogError, CatalogResult, SchemaTree};
use tracing::{debug, info};

use crate::store::{GraphQuery, GraphStore};

pub const UPSERT_DATABASE: &str = "MERGE (d:Database {name: $name})
 ON CREATE SET d.custom_id = $custom_id";

pub const UPSERT_SCHEMA: &str = "MATCH (d:Database {name: $database})
 MERGE (d)-[:CONTAINS]->(s:Schema {name: $name})
 ON CREATE SET s.custom_id = $custom_id";

pub const UPSERT_TABLE: &str = "MATCH (d:Database {name: $database})-[:CONTAINS]->(s:Schema {name: $schema})
 MERGE (s)-[:CONTAINS]->(t:CatalogTable {name: $name})
 ON CREATE SET t.custom_id = $custom_id";

pub const UPSERT_COLUMN: &str = "MATCH (d:Database {name: $database})-[:CONTAINS]->(s:Schema {name: $schema})-[:CONTAINS]->(t:CatalogTable {name: $table})
 MERGE (t)-[:CONTAINS]->(c:CatalogColumn {name: $name})
 ON CREATE SET c.custom_id = $custom_id
 SET c += $properties";

/// Counts of upserts performed per catalog level.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncReport {
    pub databases: usize,
    pub schemas: usize,
    pub tables: usize,
    pub columns: usize,
}

/// Persist an extracted metadata tree into the catalog graph.
pub async fn synchronize(
    store: &dyn GraphStore,
    database: &str,
    tree: &SchemaTree,
) -> CatalogResult<SyncReport> {
    info!(database, schemas = tree.len(), "Starting catalog sync");

    let mut report = SyncReport::default();

    upsert(
        store,
        GraphQuery::new(UPSERT_DATABASE)
            .param("name", database)
            .param("custom_id", generate_id()),
        || format!("database {database}"),
    )
    .await?;
    report.databases += 1;

    for (schema_name, tables) in tree {
        upsert(
            store,
            GraphQuery::new(UPSERT_SCHEMA)
                .param("database", database)
                .param("name", schema_name.as_str())
                .param("custom_id", generate_id()),
            || format!("schema {schema_name}"),
        )
        .await?;
        report.schemas += 1;

        for (table_name, columns) in tables {
            upsert(
                store,
                GraphQuery::new(UPSERT_TABLE)
                    .param("database", database)
                    .param("schema", schema_name.as_str())
                    .param("name", table_name.as_str())
                    .param("custom_id", generate_id()),
                || format!("table {schema_name}.{table_name}"),
            )
            .await?;
            report.tables += 1;

            for column in columns {
                let Some(column_name) = column.get("column_name").and_then(|v| v.as_str()) else {
                    debug!(schema = %schema_name, table = %table_name, "Skipping column without a column_name");
                    continue;
                };

                // Null-valued properties are dropped by the sanitizer, so
                // they never overwrite existing values on re-sync.
                let properties = sanitize(column);

                upsert(
                    store,
                    GraphQuery::new(UPSERT_COLUMN)
                        .param("database", database)
                        .param("schema", schema_name.as_str())
                        .param("table", table_name.as_str())
                        .param("name", column_name)
                        .param("custom_id", generate_id())
                        .param("properties", properties),
                    || format!("column {schema_name}.{table_name}.{column_name}"),
                )
                .await?;
                report.columns += 1;
            }

            debug!(schema = %schema_name, table = %table_name, "Table synced");
        }
    }

    info!(
        schemas = report.schemas,
        tables = report.tables,
        columns = report.columns,
        "Catalog sync complete"
    );
    Ok(report)
}

async fn upsert(
    store: &dyn GraphStore,
    query: GraphQuery,
    entity: impl Fn() -> String,
) -> CatalogResult<()> {
    store
        .run(query)
        .await
        .map_err(|e| CatalogError::sync_failed(entity(), e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, HashMap};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use crate::store::Record;

    /// Interprets the upsert statements over an in-memory node table so
    /// idempotency can be observed: a node keyed by its catalog path keeps
    /// the custom_id from the run that created it.
    #[derive(Default)]
    struct FakeCatalog {
        nodes: Mutex<HashMap<String, String>>,
        fail_on_table: Option<String>,
        statements: Mutex<Vec<GraphQuery>>,
    }

    impl FakeCatalog {
        fn ids(&self) -> HashMap<String, String> {
            self.nodes.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl crate::store::GraphStore for FakeCatalog {
        async fn run(&self, query: GraphQuery) -> CatalogResult<Vec<Record>> {
            self.statements.lock().unwrap().push(query.clone());

            let name = query.string_param("name").unwrap_or_default().to_string();
            let path = match query.cypher.as_str() {
                UPSERT_DATABASE => name.clone(),
                UPSERT_SCHEMA => {
                    format!("{}/{}", query.string_param("database").unwrap(), name)
                }
                UPSERT_TABLE => format!(
                    "{}/{}/{}",
                    query.string_param("database").unwrap(),
                    query.string_param("schema").unwrap(),
                    name
                ),
                UPSERT_COLUMN => format!(
                    "{}/{}/{}/{}",
                    query.string_param("database").unwrap(),
                    query.string_param("schema").unwrap(),
                    query.string_param("table").unwrap(),
                    name
                ),
                other => panic!("unexpected statement: {other}"),
            };

            if query.cypher == UPSERT_TABLE {
                if let Some(fail) = &self.fail_on_table {
                    if &name == fail {
                        return Err(CatalogError::GraphUnavailable("boom".into()));
                    }
                }
            }

            let custom_id = query.string_param("custom_id").unwrap().to_string();
            self.nodes.lock().unwrap().entry(path).or_insert(custom_id);
            Ok(Vec::new())
        }
    }

    fn sample_tree() -> SchemaTree {
        let mut tree = SchemaTree::new();
        let mut public = BTreeMap::new();
        public.insert(
            "PRODUCTS".to_string(),
            vec![
                json!({"column_name": "ID", "data_type": "NUMBER", "comment": null})
                    .as_object()
                    .unwrap()
                    .clone(),
                json!({"column_name": "PRICE", "data_type": "FLOAT"})
                    .as_object()
                    .unwrap()
                    .clone(),
            ],
        );
        public.insert("ORDERS".to_string(), vec![]);
        tree.insert("PUBLIC".to_string(), public);
        tree
    }

    #[tokio::test]
    async fn test_sync_counts_each_level() {
        let store = FakeCatalog::default();
        let report = synchronize(&store, "ANALYTICS", &sample_tree()).await.unwrap();

        assert_eq!(
            report,
            SyncReport {
                databases: 1,
                schemas: 1,
                tables: 2,
                columns: 2,
            }
        );
    }

    #[tokio::test]
    async fn test_resync_mints_no_new_ids() {
        let store = FakeCatalog::default();
        let tree = sample_tree();

        synchronize(&store, "ANALYTICS", &tree).await.unwrap();
        let first = store.ids();

        synchronize(&store, "ANALYTICS", &tree).await.unwrap();
        let second = store.ids();

        // Same node set, same custom_ids: the candidate ids generated on
        // the second run only apply on the create branch, which never runs.
        assert_eq!(first, second);
        assert_eq!(first.len(), 6);
    }

    #[tokio::test]
    async fn test_failed_upsert_aborts_walk_and_names_entity() {
        let store = FakeCatalog {
            fail_on_table: Some("PRODUCTS".to_string()),
            ..Default::default()
        };

        let err = synchronize(&store, "ANALYTICS", &sample_tree())
            .await
            .unwrap_err();

        match err {
            CatalogError::SynchronizationFailed { entity, .. } => {
                assert_eq!(entity, "table PUBLIC.PRODUCTS");
            }
            other => panic!("unexpected error: {other}"),
        }

        // ORDERS sorts before PRODUCTS, so the database, schema, and the
        // ORDERS table made it in before the abort; no columns did.
        let statements = store.statements.lock().unwrap().clone();
        assert!(!statements.iter().any(|q| q.cypher == UPSERT_COLUMN));
    }

    #[tokio::test]
    async fn test_column_upsert_excludes_null_properties() {
        let store = FakeCatalog::default();
        synchronize(&store, "ANALYTICS", &sample_tree()).await.unwrap();

        // The ID column carries a null comment; it must not reach the merge.
        let statements = store.statements.lock().unwrap().clone();
        let id_upsert = statements
            .iter()
            .find(|q| q.cypher == UPSERT_COLUMN && q.string_param("name") == Some("ID"))
            .unwrap();

        match id_upsert.params.get("properties").unwrap() {
            crate::store::ParamValue::Map(props) => {
                assert!(props.contains_key("column_name"));
                assert!(props.contains_key("data_type"));
                assert!(!props.contains_key("comment"));
            }
            other => panic!("properties should be a map, got {other:?}"),
        }
    }
}
