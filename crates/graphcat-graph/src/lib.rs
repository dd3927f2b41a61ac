//! # Graphcat Graph
//!
//! Neo4j-backed catalog operations: entity CRUD, warehouse metadata
//! synchronization, and keyword search over the property graph.

pub mod client;
pub mod columns;
pub mod metadata;
pub mod rules;
pub mod search;
pub mod store;
pub mod sync;
pub mod tables;

pub use client::{GraphClient, GraphConfig};
pub use store::{GraphQuery, GraphStore, ParamValue, Record};
pub use sync::{synchronize, SyncReport};

#[cfg(test)]
pub(crate) mod testing;
