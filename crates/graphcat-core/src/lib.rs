//! # Graphcat Core
//!
//! Shared types for the graphcat metadata catalog: the error taxonomy,
//! the dynamic property value model, and id generation.

pub mod catalog;
pub mod error;
pub mod id;
pub mod property;

pub use catalog::SchemaTree;
pub use error::{CatalogError, CatalogResult};
pub use id::generate_id;
pub use property::{sanitize, PropertyValue};
