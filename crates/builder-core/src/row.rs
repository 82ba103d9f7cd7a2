//! Row representation shared by all builders.
//!
//! A [`Row`] keeps its identity and its properties as two separate fields.
//! They are only merged into a single map ([`FlatRow`]) at the boundary
//! where rows are bound as query parameters or written to a bulk file.

use serde_json::Value;
use std::collections::{BTreeSet, HashMap};

/// Property name to value mapping of a single row.
pub type Properties = HashMap<String, Value>;

/// Identity and properties merged into one map.
pub type FlatRow = HashMap<String, Value>;

/// Flattened field holding a relationship's source node id.
pub const SRC_ID_FIELD: &str = "src_node_id";

/// Flattened field holding a relationship's target node id.
pub const TGT_ID_FIELD: &str = "tgt_node_id";

/// Unique key of a row within one builder invocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identity {
    /// Node identity: a single opaque id.
    Node(String),
    /// Relationship identity: ordered (source id, target id) pair.
    Relationship { source: String, target: String },
}

impl Identity {
    pub fn node(id: impl Into<String>) -> Self {
        Identity::Node(id.into())
    }

    pub fn relationship(source: impl Into<String>, target: impl Into<String>) -> Self {
        Identity::Relationship {
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn is_node(&self) -> bool {
        matches!(self, Identity::Node(_))
    }
}

/// One node or relationship to write.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub identity: Identity,
    pub properties: Properties,
}

impl Row {
    /// Create a node row.
    pub fn node(id: impl Into<String>, properties: Properties) -> Self {
        Self {
            identity: Identity::node(id),
            properties,
        }
    }

    /// Create a relationship row from `source` to `target`.
    pub fn relationship(
        source: impl Into<String>,
        target: impl Into<String>,
        properties: Properties,
    ) -> Self {
        Self {
            identity: Identity::relationship(source, target),
            properties,
        }
    }

    /// Add or replace a property.
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Names of the row's properties, identity excluded.
    pub fn property_keys(&self) -> BTreeSet<String> {
        self.properties.keys().cloned().collect()
    }

    /// Merge identity and properties into one map.
    ///
    /// Node ids are stored under `id_property`; relationship endpoints under
    /// [`SRC_ID_FIELD`] and [`TGT_ID_FIELD`].
    pub fn flatten(&self, id_property: &str) -> FlatRow {
        let mut flat = FlatRow::with_capacity(self.properties.len() + 2);
        match &self.identity {
            Identity::Node(id) => {
                flat.insert(id_property.to_string(), Value::String(id.clone()));
            }
            Identity::Relationship { source, target } => {
                flat.insert(SRC_ID_FIELD.to_string(), Value::String(source.clone()));
                flat.insert(TGT_ID_FIELD.to_string(), Value::String(target.clone()));
            }
        }
        for (name, value) in &self.properties {
            flat.insert(name.clone(), value.clone());
        }
        flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_node_row() {
        let row = Row::node("m1", Properties::new()).with_property("title", "Heat");
        let flat = row.flatten("node_id");

        assert_eq!(flat.len(), 2);
        assert_eq!(flat["node_id"], json!("m1"));
        assert_eq!(flat["title"], json!("Heat"));
    }

    #[test]
    fn test_flatten_relationship_row() {
        let row = Row::relationship("m1", "g1", Properties::new()).with_property("strength", 1.0);
        let flat = row.flatten("node_id");

        assert_eq!(flat[SRC_ID_FIELD], json!("m1"));
        assert_eq!(flat[TGT_ID_FIELD], json!("g1"));
        assert_eq!(flat["strength"], json!(1.0));
        assert!(!flat.contains_key("node_id"));
    }

    #[test]
    fn test_relationship_identity_is_ordered() {
        assert_ne!(
            Identity::relationship("a", "b"),
            Identity::relationship("b", "a")
        );
    }
}
