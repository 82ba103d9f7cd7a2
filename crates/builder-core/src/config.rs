//! Per-builder configuration.

use crate::cast::PropertyCastMap;
use std::path::PathBuf;

/// Default property holding a node's identity.
pub const DEFAULT_ID_PROPERTY: &str = "node_id";

/// Default directory bulk files are written to (the store's import directory).
pub const DEFAULT_IMPORT_DIR: &str = "/resources/db/neo4j/import";

/// Default number of rows per transaction.
pub const DEFAULT_TRANSACTION_SIZE: usize = 10_000;

/// Default indentation of property fragment continuation lines.
pub const DEFAULT_INDENT_SPACES: usize = 8;

/// How rows reach the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Rows are bound as a parameter batch and merged by identity.
    #[default]
    TransactionalUpsert,
    /// Rows are written to a CSV file which a single create statement loads.
    BulkFileCreate,
}

impl ExecutionMode {
    pub fn is_bulk_file(self) -> bool {
        self == ExecutionMode::BulkFileCreate
    }
}

/// Node or relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Node,
    Relationship,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Node => write!(f, "node"),
            EntityKind::Relationship => write!(f, "relationship"),
        }
    }
}

/// Type names of the entity a builder writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityType {
    Node {
        node_type: String,
    },
    Relationship {
        rel_type: String,
        src_node_type: String,
        tgt_node_type: String,
    },
}

impl EntityType {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityType::Node { .. } => EntityKind::Node,
            EntityType::Relationship { .. } => EntityKind::Relationship,
        }
    }

    /// Node label or relationship type.
    pub fn name(&self) -> &str {
        match self {
            EntityType::Node { node_type } => node_type,
            EntityType::Relationship { rel_type, .. } => rel_type,
        }
    }
}

/// Variable names used inside rendered queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryNames {
    pub row: String,
    pub node: String,
    pub rel: String,
}

impl Default for QueryNames {
    fn default() -> Self {
        Self {
            row: "row".to_string(),
            node: "node".to_string(),
            rel: "rel".to_string(),
        }
    }
}

/// Immutable configuration of one entity builder.
///
/// Every builder owns its own value; nothing is shared between instances.
#[derive(Debug, Clone)]
pub struct BuilderConfig {
    /// Node label or relationship type with its endpoint labels
    pub entity: EntityType,

    /// Property holding node identities
    pub id_property: String,

    /// File name of the bulk file, relative to `import_dir`
    pub out_file_name: String,

    /// Directory bulk files are written to
    pub import_dir: PathBuf,

    /// Declared properties and their coercions (identity excluded)
    pub property_casts: PropertyCastMap,

    /// Maximum number of rows per transaction
    pub transaction_size: usize,

    /// Transactional upsert or bulk-file create
    pub mode: ExecutionMode,

    /// Variable names used in rendered queries
    pub names: QueryNames,

    /// Indentation of property fragment continuation lines
    pub indent_spaces: usize,
}

impl BuilderConfig {
    fn with_entity(
        entity: EntityType,
        out_file_name: impl Into<String>,
        property_casts: PropertyCastMap,
    ) -> Self {
        Self {
            entity,
            id_property: DEFAULT_ID_PROPERTY.to_string(),
            out_file_name: out_file_name.into(),
            import_dir: PathBuf::from(DEFAULT_IMPORT_DIR),
            property_casts,
            transaction_size: DEFAULT_TRANSACTION_SIZE,
            mode: ExecutionMode::default(),
            names: QueryNames::default(),
            indent_spaces: DEFAULT_INDENT_SPACES,
        }
    }

    /// Configuration for a node builder.
    pub fn node(
        node_type: impl Into<String>,
        out_file_name: impl Into<String>,
        property_casts: PropertyCastMap,
    ) -> Self {
        Self::with_entity(
            EntityType::Node {
                node_type: node_type.into(),
            },
            out_file_name,
            property_casts,
        )
    }

    /// Configuration for a relationship builder.
    pub fn relationship(
        rel_type: impl Into<String>,
        src_node_type: impl Into<String>,
        tgt_node_type: impl Into<String>,
        out_file_name: impl Into<String>,
        property_casts: PropertyCastMap,
    ) -> Self {
        Self::with_entity(
            EntityType::Relationship {
                rel_type: rel_type.into(),
                src_node_type: src_node_type.into(),
                tgt_node_type: tgt_node_type.into(),
            },
            out_file_name,
            property_casts,
        )
    }

    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Switch between bulk-file create (`true`) and transactional upsert.
    pub fn with_bulk_file(self, bulk_file: bool) -> Self {
        self.with_mode(if bulk_file {
            ExecutionMode::BulkFileCreate
        } else {
            ExecutionMode::TransactionalUpsert
        })
    }

    /// Set the transaction size. Values below one are raised to one.
    pub fn with_transaction_size(mut self, transaction_size: usize) -> Self {
        self.transaction_size = transaction_size.max(1);
        self
    }

    pub fn with_import_dir(mut self, import_dir: impl Into<PathBuf>) -> Self {
        self.import_dir = import_dir.into();
        self
    }

    pub fn with_id_property(mut self, id_property: impl Into<String>) -> Self {
        self.id_property = id_property.into();
        self
    }

    pub fn with_indent_spaces(mut self, indent_spaces: usize) -> Self {
        self.indent_spaces = indent_spaces;
        self
    }

    pub fn with_names(mut self, names: QueryNames) -> Self {
        self.names = names;
        self
    }

    pub fn kind(&self) -> EntityKind {
        self.entity.kind()
    }

    /// Node label or relationship type.
    pub fn type_name(&self) -> &str {
        self.entity.name()
    }

    /// Declared casts plus the implicit identity coercion.
    pub fn cast_map(&self) -> PropertyCastMap {
        self.property_casts.clone().with_identity(&self.id_property)
    }

    /// Full path of the bulk file.
    pub fn out_path(&self) -> PathBuf {
        self.import_dir.join(&self.out_file_name)
    }
}
