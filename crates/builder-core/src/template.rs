//! Query template document.
//!
//! Templates are format strings with `{slot}` placeholders. A doubled brace
//! (`{{` or `}}`) renders a literal brace, which Cypher map literals need.
//! Each template is parsed once into [`Segment`]s so that the slots it
//! requires are known before anything is rendered.

use crate::error::{CoreError, Result};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use tracing::debug;

/// Template document shipped with the crate.
pub const DEFAULT_TEMPLATES: &str = include_str!("../conf/graph-builder.yaml");

/// Values to substitute into a template, keyed by slot name.
pub type SlotValues<'a> = HashMap<&'a str, String>;

/// Names of the templates a document must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TemplateName {
    HeadCreation,
    CsvHeadCreation,
    NodeCreate,
    NodeMerge,
    RelCreate,
    RelMerge,
    Constraint,
    Index,
    FullTextIndex,
    VectorIndex,
}

impl TemplateName {
    pub const ALL: [TemplateName; 10] = [
        TemplateName::HeadCreation,
        TemplateName::CsvHeadCreation,
        TemplateName::NodeCreate,
        TemplateName::NodeMerge,
        TemplateName::RelCreate,
        TemplateName::RelMerge,
        TemplateName::Constraint,
        TemplateName::Index,
        TemplateName::FullTextIndex,
        TemplateName::VectorIndex,
    ];

    /// Key of the template in the document.
    pub fn as_str(self) -> &'static str {
        match self {
            TemplateName::HeadCreation => "head-creation-query",
            TemplateName::CsvHeadCreation => "csv-head-creation-query",
            TemplateName::NodeCreate => "node-create-query",
            TemplateName::NodeMerge => "node-merge-query",
            TemplateName::RelCreate => "rel-create-query",
            TemplateName::RelMerge => "rel-merge-query",
            TemplateName::Constraint => "constraint",
            TemplateName::Index => "index",
            TemplateName::FullTextIndex => "full-text-index",
            TemplateName::VectorIndex => "vector-index",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        TemplateName::ALL.into_iter().find(|name| name.as_str() == key)
    }
}

impl std::fmt::Display for TemplateName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Slot(String),
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTemplate {
    name: String,
    segments: Vec<Segment>,
}

impl QueryTemplate {
    /// Parse `source` into literal and slot segments.
    pub fn parse(name: impl Into<String>, source: &str) -> Result<Self> {
        let name = name.into();
        let malformed = |position: usize, reason: &'static str| CoreError::MalformedTemplate {
            name: name.clone(),
            position,
            reason,
        };

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((position, c)) = chars.next() {
            match c {
                '{' if matches!(chars.peek(), Some((_, '{'))) => {
                    chars.next();
                    literal.push('{');
                }
                '}' if matches!(chars.peek(), Some((_, '}'))) => {
                    chars.next();
                    literal.push('}');
                }
                '}' => return Err(malformed(position, "unmatched '}'")),
                '{' => {
                    let mut slot = String::new();
                    loop {
                        match chars.next() {
                            Some((_, '}')) => break,
                            Some((_, c)) if c.is_ascii_alphanumeric() || c == '_' => slot.push(c),
                            Some((at, _)) => return Err(malformed(at, "invalid slot character")),
                            None => return Err(malformed(position, "unterminated slot")),
                        }
                    }
                    if slot.is_empty() {
                        return Err(malformed(position, "empty slot name"));
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Slot(slot));
                }
                c => literal.push(c),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { name, segments })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Slot names the template requires.
    pub fn slots(&self) -> BTreeSet<&str> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Slot(slot) => Some(slot.as_str()),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// Substitute `values` into the template. Unused values are ignored.
    pub fn render(&self, values: &SlotValues<'_>) -> Result<String> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Slot(slot) => {
                    let value =
                        values
                            .get(slot.as_str())
                            .ok_or_else(|| CoreError::MissingSlot {
                                template: self.name.clone(),
                                slot: slot.clone(),
                            })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

/// All templates of a document, parsed.
#[derive(Debug, Clone)]
pub struct QueryTemplates {
    templates: HashMap<TemplateName, QueryTemplate>,
}

impl QueryTemplates {
    /// Parse a YAML document mapping template names to template text.
    ///
    /// Every [`TemplateName`] must be present; unknown keys are rejected.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let raw: HashMap<String, String> = serde_yaml::from_str(yaml)?;

        let mut templates = HashMap::with_capacity(raw.len());
        for (key, source) in raw {
            let name =
                TemplateName::parse(&key).ok_or_else(|| CoreError::UnknownTemplate(key.clone()))?;
            let template = QueryTemplate::parse(key, &source)?;
            debug!("Loaded template '{}' with slots {:?}", name, template.slots());
            templates.insert(name, template);
        }

        if let Some(missing) = TemplateName::ALL
            .into_iter()
            .find(|name| !templates.contains_key(name))
        {
            return Err(CoreError::MissingTemplate(missing.as_str()));
        }

        Ok(Self { templates })
    }

    /// Load a template document from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// The template document shipped with the crate.
    pub fn embedded() -> Result<Self> {
        Self::from_yaml(DEFAULT_TEMPLATES)
    }

    pub fn get(&self, name: TemplateName) -> &QueryTemplate {
        // from_yaml guarantees every name is present
        &self.templates[&name]
    }

    /// Render the template `name` with `values`.
    pub fn render(&self, name: TemplateName, values: &SlotValues<'_>) -> Result<String> {
        self.get(name).render(values)
    }
}
