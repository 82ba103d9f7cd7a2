//! Ordered property coercion declarations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Coercion applied to the identity property of every builder.
pub const IDENTITY_CAST: &str = "toString";

/// A single property and its optional Cypher coercion function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyCast {
    pub name: String,
    #[serde(default)]
    pub cast: Option<String>,
}

/// Property name to coercion function mapping, in declaration order.
///
/// The order drives the line order of the rendered property fragment and
/// the column order of bulk files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyCastMap {
    entries: Vec<PropertyCast>,
}

impl PropertyCastMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a property coerced with `cast`, e.g. `toFloat`.
    pub fn cast(mut self, name: impl Into<String>, cast: impl Into<String>) -> Self {
        self.insert(name, Some(cast.into()));
        self
    }

    /// Declare a property written as-is.
    pub fn raw(mut self, name: impl Into<String>) -> Self {
        self.insert(name, None);
        self
    }

    /// Insert or replace a declaration. A replaced entry keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, cast: Option<String>) {
        let name = name.into();
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.cast = cast,
            None => self.entries.push(PropertyCast { name, cast }),
        }
    }

    /// Append the implicit identity coercion unless `id_property` is already declared.
    pub fn with_identity(mut self, id_property: &str) -> Self {
        if !self.contains(id_property) {
            self.entries.push(PropertyCast {
                name: id_property.to_string(),
                cast: Some(IDENTITY_CAST.to_string()),
            });
        }
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    pub fn entries(&self) -> &[PropertyCast] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Declared property names without the identity property.
    pub fn property_names(&self, id_property: &str) -> BTreeSet<String> {
        self.names()
            .filter(|name| *name != id_property)
            .map(str::to_string)
            .collect()
    }
}

impl<K, V> FromIterator<(K, Option<V>)> for PropertyCastMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, Option<V>)>>(iter: T) -> Self {
        let mut map = PropertyCastMap::new();
        for (name, cast) in iter {
            map.insert(name, cast.map(Into::into));
        }
        map
    }
}
