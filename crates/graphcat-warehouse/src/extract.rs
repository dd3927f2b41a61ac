//! Warehouse metadata extraction.
//!
//! Three-level read-only walk: schemas in the database, tables in each
//! schema, columns (with every warehouse-reported property) in each
//! table. Any stage failing aborts the whole extraction; a partial
//! catalog is not useful.

use graphcat_core::{CatalogError, CatalogResult, SchemaTree};
use tracing::debug;

use crate::client::{SqlRecord, SqlRunner};

/// Extract the full schema/table/column hierarchy of a database.
pub async fn extract_metadata(runner: &dyn SqlRunner, database: &str) -> CatalogResult<SchemaTree> {
    let mut tree = SchemaTree::new();

    for schema in names(show_schemas(runner, database).await?) {
        let mut tables = std::collections::BTreeMap::new();

        for table in names(show_tables(runner, database, &schema).await?) {
            let columns = show_columns(runner, database, &schema, &table).await?;
            debug!(schema = %schema, table = %table, columns = columns.len(), "Extracted table");
            tables.insert(table, columns);
        }

        tree.insert(schema, tables);
    }

    Ok(tree)
}

/// `SHOW DATABASES` passthrough.
pub async fn show_databases(runner: &dyn SqlRunner) -> CatalogResult<Vec<SqlRecord>> {
    run(runner, "SHOW DATABASES".to_string()).await
}

/// `SHOW SCHEMAS IN DATABASE` passthrough.
pub async fn show_schemas(runner: &dyn SqlRunner, database: &str) -> CatalogResult<Vec<SqlRecord>> {
    run(runner, format!("SHOW SCHEMAS IN DATABASE {database}")).await
}

/// `SHOW TABLES IN SCHEMA` passthrough.
pub async fn show_tables(
    runner: &dyn SqlRunner,
    database: &str,
    schema: &str,
) -> CatalogResult<Vec<SqlRecord>> {
    run(runner, format!("SHOW TABLES IN SCHEMA {database}.{schema}")).await
}

/// `SHOW COLUMNS IN TABLE` passthrough. Returns the full property map the
/// warehouse reports for each column, not a fixed subset.
pub async fn show_columns(
    runner: &dyn SqlRunner,
    database: &str,
    schema: &str,
    table: &str,
) -> CatalogResult<Vec<SqlRecord>> {
    run(runner, format!("SHOW COLUMNS IN TABLE {database}.{schema}.{table}")).await
}

async fn run(runner: &dyn SqlRunner, sql: String) -> CatalogResult<Vec<SqlRecord>> {
    runner
        .run(&sql)
        .await
        .map_err(|e| CatalogError::MetadataExtractionFailed(e.to_string()))
}

/// SHOW output names the object in its `name` column.
fn names(rows: Vec<SqlRecord>) -> Vec<String> {
    rows.into_iter()
        .filter_map(|row| row.get("name").and_then(|v| v.as_str()).map(String::from))
        .collect()
}
