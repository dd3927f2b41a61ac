//! # Graphcat Warehouse
//!
//! Snowflake SQL API client and the schema metadata extractor that walks
//! the warehouse's database/schema/table/column hierarchy.

pub mod client;
pub mod extract;

pub use client::{SnowflakeClient, SqlRunner, WarehouseConfig};
pub use extract::extract_metadata;
