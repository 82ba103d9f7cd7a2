//! Query assembly.
//!
//! A creation query is a head clause (binding rows from the parameter batch
//! or from a bulk file) followed by a body that creates or merges the
//! entity. The body selects its template on two axes: entity kind and
//! execution mode.

use crate::cast::PropertyCastMap;
use crate::config::{BuilderConfig, EntityKind, EntityType, ExecutionMode};
use crate::error::Result;
use crate::template::{QueryTemplates, SlotValues, TemplateName};

/// How properties are assigned in the rendered fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentStyle {
    /// Map literal entries: `name: access`.
    Create,
    /// SET assignments on a variable: `var.name = access`.
    Merge,
}

impl AssignmentStyle {
    pub fn separator(self) -> &'static str {
        match self {
            AssignmentStyle::Create => ": ",
            AssignmentStyle::Merge => " = ",
        }
    }
}

/// Render the property assignment fragment.
///
/// One line per cast map entry, in declaration order:
/// `<prefix><name><separator><access>`, comma-terminated except the last.
/// Continuation lines are indented by `indent_spaces`.
pub fn property_fragment(
    casts: &PropertyCastMap,
    row_name: &str,
    indent_spaces: usize,
    separator: &str,
    prefix: &str,
) -> String {
    let lines: Vec<String> = casts
        .entries()
        .iter()
        .map(|entry| {
            let access = match &entry.cast {
                Some(cast) => format!("{cast}({row_name}.{})", entry.name),
                None => format!("{row_name}.{}", entry.name),
            };
            format!("{prefix}{}{separator}{access}", entry.name)
        })
        .collect();

    lines.join(&format!(",\n{}", " ".repeat(indent_spaces)))
}

/// Renders creation queries for one builder configuration.
pub struct QueryAssembler<'a> {
    templates: &'a QueryTemplates,
    config: &'a BuilderConfig,
}

impl<'a> QueryAssembler<'a> {
    pub fn new(templates: &'a QueryTemplates, config: &'a BuilderConfig) -> Self {
        Self { templates, config }
    }

    /// Head clause: `UNWIND` over the row batch, or `LOAD CSV` of the bulk file.
    pub fn head_query(&self) -> Result<String> {
        let names = &self.config.names;
        let mut values = SlotValues::new();
        values.insert("row_name", names.row.clone());

        match self.config.mode {
            ExecutionMode::BulkFileCreate => {
                values.insert("file_input", self.config.out_file_name.clone());
                self.templates
                    .render(TemplateName::CsvHeadCreation, &values)
            }
            ExecutionMode::TransactionalUpsert => {
                self.templates.render(TemplateName::HeadCreation, &values)
            }
        }
    }

    /// Body template for this configuration's entity kind and mode.
    pub fn body_template(&self) -> TemplateName {
        match (self.config.kind(), self.config.mode) {
            (EntityKind::Node, ExecutionMode::BulkFileCreate) => TemplateName::NodeCreate,
            (EntityKind::Node, ExecutionMode::TransactionalUpsert) => TemplateName::NodeMerge,
            (EntityKind::Relationship, ExecutionMode::BulkFileCreate) => TemplateName::RelCreate,
            (EntityKind::Relationship, ExecutionMode::TransactionalUpsert) => TemplateName::RelMerge,
        }
    }

    /// Property fragment in the style the body template expects.
    pub fn fragment(&self) -> String {
        let names = &self.config.names;
        let (style, prefix) = match (self.config.mode, self.config.kind()) {
            (ExecutionMode::BulkFileCreate, _) => (AssignmentStyle::Create, String::new()),
            (ExecutionMode::TransactionalUpsert, EntityKind::Node) => {
                (AssignmentStyle::Merge, format!("{}.", names.node))
            }
            (ExecutionMode::TransactionalUpsert, EntityKind::Relationship) => {
                (AssignmentStyle::Merge, format!("{}.", names.rel))
            }
        };

        property_fragment(
            &self.config.cast_map(),
            &names.row,
            self.config.indent_spaces,
            style.separator(),
            &prefix,
        )
    }

    /// Body clause creating or merging the entity.
    pub fn body_query(&self) -> Result<String> {
        let names = &self.config.names;
        let mut values = SlotValues::new();
        values.insert("row_name", names.row.clone());
        values.insert("node_name", names.node.clone());
        values.insert("rel_name", names.rel.clone());
        values.insert("id_property", self.config.id_property.clone());
        values.insert("property_fragment", self.fragment());

        match &self.config.entity {
            EntityType::Node { node_type } => {
                values.insert("node_type", node_type.clone());
            }
            EntityType::Relationship {
                rel_type,
                src_node_type,
                tgt_node_type,
            } => {
                values.insert("rel_type", rel_type.clone());
                values.insert("src_node_type", src_node_type.clone());
                values.insert("tgt_node_type", tgt_node_type.clone());
            }
        }

        self.templates.render(self.body_template(), &values)
    }

    /// Complete query: head clause followed by the body.
    pub fn assemble(&self) -> Result<String> {
        Ok(self.head_query()? + &self.body_query()?)
    }
}
