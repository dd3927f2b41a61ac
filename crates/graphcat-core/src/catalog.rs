//! The extracted warehouse metadata tree.

use std::collections::BTreeMap;

/// All properties the warehouse reports for a single column.
pub type ColumnProperties = serde_json::Map<String, serde_json::Value>;

/// Tables of one schema, each with its column metadata.
pub type TableColumns = BTreeMap<String, Vec<ColumnProperties>>;

/// Schema -> Table -> Columns, as returned by metadata extraction and
/// consumed by catalog synchronization.
pub type SchemaTree = BTreeMap<String, TableColumns>;
