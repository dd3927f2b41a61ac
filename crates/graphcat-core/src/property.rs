//! Dynamic property values and the sanitization boundary.
//!
//! User-supplied property bags are schema-free JSON. Before anything is
//! merged onto a graph node it passes through [`sanitize`], which keeps
//! only values the graph store can hold as node properties: primitive
//! scalars and lists of primitive scalars. Nested maps and nulls are
//! dropped silently.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A property value accepted onto a graph node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<PropertyValue>),
}

impl PropertyValue {
    /// Convert a JSON value, returning None for anything that is not a
    /// primitive scalar or a list of primitive scalars.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Self::Integer(i))
                } else {
                    n.as_f64().map(Self::Float)
                }
            }
            Value::String(s) => Some(Self::String(s.clone())),
            Value::Array(items) => {
                let mut list = Vec::with_capacity(items.len());
                for item in items {
                    match Self::from_json(item)? {
                        // A list inside a list is not a primitive element.
                        PropertyValue::List(_) => return None,
                        scalar => list.push(scalar),
                    }
                }
                Some(Self::List(list))
            }
            Value::Null | Value::Object(_) => None,
        }
    }

    /// Render as JSON for response bodies.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Bool(b) => Value::Bool(*b),
            Self::Integer(i) => Value::from(*i),
            Self::Float(f) => Value::from(*f),
            Self::String(s) => Value::String(s.clone()),
            Self::List(items) => Value::Array(items.iter().map(Self::to_json).collect()),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Filter a user-supplied property bag down to values safe to merge onto
/// a graph node. Entries with unsupported values are dropped, not errors.
pub fn sanitize(props: &serde_json::Map<String, Value>) -> BTreeMap<String, PropertyValue> {
    props
        .iter()
        .filter_map(|(key, value)| PropertyValue::from_json(value).map(|v| (key.clone(), v)))
        .collect()
}
