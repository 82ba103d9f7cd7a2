//! CSV writer for deduplicated row batches.

use crate::error::BulkFileError;
use builder_core::{BuilderConfig, EntityKind, Row, SRC_ID_FIELD, TGT_ID_FIELD};
use csv::{QuoteStyle, WriterBuilder};
use serde_json::Value;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Default buffer size for CSV writing.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Metrics from a bulk-file write.
#[derive(Debug, Clone, Default)]
pub struct WriteMetrics {
    /// Number of rows written (header excluded).
    pub rows_written: u64,
    /// Output file size in bytes.
    pub file_size_bytes: u64,
    /// Time taken.
    pub duration: Duration,
}

/// Writes a row batch as a headed CSV file.
///
/// Embedded quotes are escaped with a backslash instead of being doubled,
/// which is what `LOAD CSV` expects. Backslashes in values are doubled so
/// they never escape the closing quote. Fields are only quoted when they
/// contain the delimiter, a quote, a backslash or a line break.
#[derive(Debug, Clone)]
pub struct BulkFileWriter {
    delimiter: u8,
    escape: u8,
}

impl Default for BulkFileWriter {
    fn default() -> Self {
        Self {
            delimiter: b',',
            escape: b'\\',
        }
    }
}

impl BulkFileWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Write `rows` to `config.out_path()`.
    pub fn write_for(
        &self,
        config: &BuilderConfig,
        rows: &[Row],
    ) -> Result<WriteMetrics, BulkFileError> {
        self.write(config.out_path(), config, rows)
    }

    /// Write `rows` to `output_path`, one record per row, header first.
    ///
    /// Columns are the identity column(s) followed by the declared
    /// properties in declaration order.
    pub fn write<P: AsRef<Path>>(
        &self,
        output_path: P,
        config: &BuilderConfig,
        rows: &[Row],
    ) -> Result<WriteMetrics, BulkFileError> {
        let start_time = Instant::now();
        let output_path = output_path.as_ref();
        info!("Writing csv => {}", output_path.display());

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(output_path)?;
        let buf_writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file);
        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .double_quote(false)
            .escape(self.escape)
            .quote_style(QuoteStyle::Necessary)
            .from_writer(buf_writer);

        let columns = column_names(config);
        writer.write_record(&columns)?;

        let mut metrics = WriteMetrics::default();
        for row in rows {
            let flat = row.flatten(&config.id_property);
            let record: Vec<String> = columns
                .iter()
                .map(|column| escape_field(value_to_field(flat.get(column)), self.escape))
                .collect();
            writer.write_record(&record)?;
            metrics.rows_written += 1;

            if metrics.rows_written % 10000 == 0 {
                debug!("Written {} rows", metrics.rows_written);
            }
        }

        writer.flush()?;
        drop(writer);

        metrics.file_size_bytes = std::fs::metadata(output_path)?.len();
        metrics.duration = start_time.elapsed();

        debug!(
            "Bulk file complete: {} rows, {} bytes in {:?}",
            metrics.rows_written, metrics.file_size_bytes, metrics.duration
        );

        Ok(metrics)
    }
}

/// Column names of the bulk file for `config` (identity columns first).
pub fn column_names(config: &BuilderConfig) -> Vec<String> {
    let mut columns = match config.kind() {
        EntityKind::Node => vec![config.id_property.clone()],
        EntityKind::Relationship => vec![SRC_ID_FIELD.to_string(), TGT_ID_FIELD.to_string()],
    };
    columns.extend(
        config
            .property_casts
            .names()
            .filter(|name| *name != config.id_property)
            .map(str::to_string),
    );
    columns
}

/// Double every escape character so only escaped quotes remain.
fn escape_field(field: String, escape: u8) -> String {
    let escape = char::from(escape);
    if field.contains(escape) {
        field.replace(escape, &format!("{escape}{escape}"))
    } else {
        field
    }
}

/// Render one value as a CSV field.
///
/// Nulls become empty fields; lists and maps are written as compact JSON.
pub fn value_to_field(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other @ (Value::Array(_) | Value::Object(_))) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use builder_core::{Properties, PropertyCastMap};
    use serde_json::json;
    use tempfile::TempDir;

    fn movie_config(dir: &Path) -> BuilderConfig {
        BuilderConfig::node(
            "Movie",
            "movie-nodes.csv",
            PropertyCastMap::new()
                .cast("title", "toString")
                .raw("year"),
        )
        .with_bulk_file(true)
        .with_import_dir(dir)
    }

    #[test]
    fn test_node_file_layout() {
        let dir = TempDir::new().unwrap();
        let config = movie_config(dir.path());
        let rows = vec![
            Row::node("m1", Properties::new())
                .with_property("title", "Heat")
                .with_property("year", 1995),
            Row::node("m2", Properties::new())
                .with_property("title", "Say \"hi\", ok")
                .with_property("year", Value::Null),
        ];

        let metrics = BulkFileWriter::new().write_for(&config, &rows).unwrap();
        let content = std::fs::read_to_string(config.out_path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(metrics.rows_written, 2);
        assert_eq!(metrics.file_size_bytes, content.len() as u64);
        assert_eq!(lines[0], "node_id,title,year");
        assert_eq!(lines[1], "m1,Heat,1995");
        assert_eq!(lines[2], "m2,\"Say \\\"hi\\\", ok\",");
    }

    #[test]
    fn test_relationship_columns() {
        let config = BuilderConfig::relationship(
            "HAS_GENRE",
            "Movie",
            "Genre",
            "movie-genre-rels.csv",
            PropertyCastMap::new().cast("strength", "toFloat"),
        );

        assert_eq!(
            column_names(&config),
            vec!["src_node_id", "tgt_node_id", "strength"]
        );
    }

    #[test]
    fn test_list_values_as_json() {
        assert_eq!(value_to_field(Some(&json!([0.5, 1.0]))), "[0.5,1.0]");
        assert_eq!(value_to_field(Some(&json!(true))), "true");
        assert_eq!(value_to_field(None), "");
    }

    fn read_titles(path: &Path, delimiter: u8) -> Vec<Vec<String>> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .double_quote(false)
            .escape(Some(b'\\'))
            .from_path(path)
            .unwrap();
        reader
            .records()
            .map(|record| record.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn test_backslashes_survive_reading_back() {
        let dir = TempDir::new().unwrap();
        let config = movie_config(dir.path());
        let titles = ["a, b\\", "plain\\", "x\\\"y, z", "c:\\dir"];
        let rows: Vec<Row> = titles
            .iter()
            .enumerate()
            .map(|(i, title)| {
                Row::node(format!("m{i}"), Properties::new())
                    .with_property("title", *title)
                    .with_property("year", 2000)
            })
            .collect();

        let metrics = BulkFileWriter::new().write_for(&config, &rows).unwrap();
        let records = read_titles(&config.out_path(), b',');

        assert_eq!(metrics.rows_written, 4);
        assert_eq!(records.len(), 4);
        for (i, title) in titles.iter().enumerate() {
            assert_eq!(records[i], vec![format!("m{i}"), title.to_string(), "2000".to_string()]);
        }
    }

    #[test]
    fn test_custom_delimiter() {
        let dir = TempDir::new().unwrap();
        let config = movie_config(dir.path());
        let rows = vec![Row::node("m1", Properties::new())
            .with_property("title", "Heat, the movie")
            .with_property("year", 1995)];

        BulkFileWriter::new()
            .with_delimiter(b'\t')
            .write_for(&config, &rows)
            .unwrap();

        let content = std::fs::read_to_string(config.out_path()).unwrap();
        assert_eq!(content, "node_id\ttitle\tyear\nm1\tHeat, the movie\t1995\n");
        assert_eq!(
            read_titles(&config.out_path(), b'\t')[0],
            vec!["m1", "Heat, the movie", "1995"]
        );
    }

    #[test]
    fn test_creates_import_dir() {
        let dir = TempDir::new().unwrap();
        let config = movie_config(&dir.path().join("nested/import"));

        BulkFileWriter::new().write_for(&config, &[]).unwrap();

        let content = std::fs::read_to_string(config.out_path()).unwrap();
        assert_eq!(content, "node_id,title,year\n");
    }
}
