//! Row schema validation.

use crate::config::BuilderConfig;
use crate::error::{CoreError, Result};
use crate::row::Row;
use std::collections::BTreeSet;

/// Confirms a row's property keys match the declared property casts.
///
/// The identity property is excluded from the comparison: identities live
/// on [`Row::identity`], never in the property map.
#[derive(Debug, Clone)]
pub struct SchemaValidator {
    entity: String,
    expected: BTreeSet<String>,
}

impl SchemaValidator {
    pub fn new(config: &BuilderConfig) -> Self {
        Self {
            entity: config.type_name().to_string(),
            expected: config.cast_map().property_names(&config.id_property),
        }
    }

    pub fn expected(&self) -> &BTreeSet<String> {
        &self.expected
    }

    /// Fail with [`CoreError::SchemaMismatch`] when `row` declares other keys.
    pub fn check(&self, row: &Row) -> Result<()> {
        let observed = row.property_keys();
        if observed != self.expected {
            return Err(CoreError::SchemaMismatch {
                entity: self.entity.clone(),
                observed,
                expected: self.expected.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cast::PropertyCastMap;
    use crate::row::Properties;

    fn genre_config() -> BuilderConfig {
        BuilderConfig::node(
            "Genre",
            "genre-nodes.csv",
            PropertyCastMap::new()
                .cast("genre", "toString")
                .raw("fake_vector"),
        )
    }

    #[test]
    fn test_matching_keys_pass() {
        let validator = SchemaValidator::new(&genre_config());
        let row = Row::node("g1", Properties::new())
            .with_property("genre", "Drama")
            .with_property("fake_vector", vec![0.1, 0.2]);

        assert_eq!(validator.expected(), &row.property_keys());
        assert!(validator.check(&row).is_ok());
    }

    #[test]
    fn test_missing_key_fails() {
        let validator = SchemaValidator::new(&genre_config());
        let row = Row::node("g1", Properties::new()).with_property("genre", "Drama");

        match validator.check(&row) {
            Err(CoreError::SchemaMismatch {
                entity,
                observed,
                expected,
            }) => {
                assert_eq!(entity, "Genre");
                assert_eq!(observed.len(), 1);
                assert_eq!(expected.len(), 2);
            }
            other => panic!("expected schema mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_identity_key_in_properties_fails() {
        let validator = SchemaValidator::new(&genre_config());
        let row = Row::node("g1", Properties::new())
            .with_property("genre", "Drama")
            .with_property("fake_vector", vec![0.1])
            .with_property("node_id", "g1");

        assert!(validator.check(&row).is_err());
    }
}
