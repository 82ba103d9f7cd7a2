//! In-memory graph store for builder tests.

#![allow(dead_code)]

use builder_core::{FlatRow, WriteCounters, SRC_ID_FIELD, TGT_ID_FIELD};
use graph_store::{GraphStore, QueryParams, StoreError};
use serde_json::Value;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Mutex;

/// One recorded `execute` call.
#[derive(Debug, Clone)]
pub struct Call {
    pub query: String,
    pub rows: Option<usize>,
}

/// Store that tracks identities to mimic MERGE and CREATE semantics.
///
/// MERGE statements only count identities not seen before; CREATE
/// statements (bulk files) count every row. Bulk files are read from
/// `import_dir`.
#[derive(Default)]
pub struct MemoryStore {
    pub import_dir: PathBuf,
    pub fail_on_call: Option<usize>,
    nodes: Mutex<HashSet<String>>,
    rels: Mutex<HashSet<(String, String)>>,
    calls: Mutex<Vec<Call>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_import_dir(import_dir: impl Into<PathBuf>) -> Self {
        Self {
            import_dir: import_dir.into(),
            ..Default::default()
        }
    }

    pub fn failing_on(call: usize) -> Self {
        Self {
            fail_on_call: Some(call),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn read_bulk_file(&self, query: &str) -> Vec<FlatRow> {
        let start = query.find("file:///").expect("bulk query references a file") + 8;
        let end = start + query[start..].find('\'').expect("file name is quoted");
        let path = self.import_dir.join(&query[start..end]);

        let mut reader = csv::ReaderBuilder::new()
            .escape(Some(b'\\'))
            .double_quote(false)
            .from_path(path)
            .unwrap();
        let headers = reader.headers().unwrap().clone();
        reader
            .records()
            .map(|record| {
                let record = record.unwrap();
                headers
                    .iter()
                    .zip(record.iter())
                    .map(|(h, v)| (h.to_string(), Value::String(v.to_string())))
                    .collect()
            })
            .collect()
    }

    fn apply(&self, rows: &[FlatRow], merge: bool) -> WriteCounters {
        let mut counters = WriteCounters::default();
        let mut nodes = self.nodes.lock().unwrap();
        let mut rels = self.rels.lock().unwrap();

        for row in rows {
            let created = if let Some(src) = row.get(SRC_ID_FIELD) {
                let key = (id_of(src), id_of(&row[TGT_ID_FIELD]));
                let new = rels.insert(key);
                if !merge || new {
                    counters.relationships_created += 1;
                    true
                } else {
                    false
                }
            } else {
                let new = nodes.insert(id_of(&row["node_id"]));
                if !merge || new {
                    counters.nodes_created += 1;
                    counters.labels_added += 1;
                    true
                } else {
                    false
                }
            };
            if created {
                counters.properties_set += row.len() as u64;
            }
        }
        counters
    }
}

fn id_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[async_trait::async_trait]
impl GraphStore for MemoryStore {
    async fn execute(
        &self,
        query: &str,
        rows: Option<&[FlatRow]>,
        _params: &QueryParams,
    ) -> Result<WriteCounters, StoreError> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(Call {
                query: query.to_string(),
                rows: rows.map(<[FlatRow]>::len),
            });
            calls.len() - 1
        };
        if self.fail_on_call == Some(call) {
            return Err(StoreError::Connection("connection reset".to_string()));
        }

        if query.starts_with("CREATE CONSTRAINT") {
            return Ok(WriteCounters {
                constraints_added: 1,
                ..Default::default()
            });
        }
        if query.contains("INDEX") && !query.contains("UNWIND") {
            return Ok(WriteCounters {
                indexes_added: 1,
                ..Default::default()
            });
        }

        let counters = match rows {
            Some(rows) => self.apply(rows, query.contains("MERGE")),
            None if query.contains("LOAD CSV") => {
                let rows = self.read_bulk_file(query);
                self.apply(&rows, false)
            }
            None => WriteCounters::default(),
        };
        Ok(counters)
    }
}
