//! Error types for row validation and query templating.

use std::collections::BTreeSet;
use thiserror::Error;

/// Errors raised while validating rows or assembling queries.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Generated rows disagree with the configured property casts.
    ///
    /// This is a contract violation between the configuration and the row
    /// producer and is always raised before any store I/O.
    #[error(
        "property keys and property cast keys don't match for '{entity}': {observed:?} != {expected:?}"
    )]
    SchemaMismatch {
        entity: String,
        observed: BTreeSet<String>,
        expected: BTreeSet<String>,
    },

    /// Template document contains a key that is not a known template.
    #[error("Unknown template '{0}'")]
    UnknownTemplate(String),

    /// Template document lacks a required template.
    #[error("Template '{0}' is missing from the template document")]
    MissingTemplate(&'static str),

    /// Template text could not be parsed.
    #[error("Malformed template '{name}' at byte {position}: {reason}")]
    MalformedTemplate {
        name: String,
        position: usize,
        reason: &'static str,
    },

    /// A slot referenced by the template was given no value.
    #[error("Template '{template}' requires slot '{slot}' but no value was provided")]
    MissingSlot { template: String, slot: String },

    /// Error reading the template document.
    #[error("Failed to read template document: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing the template document.
    #[error("Failed to parse template YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
