//! Product CSV export writer.
//!
//! Lifecycle per job: `initialize`, then `write` for every batch, then
//! `flush` to produce the file.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, instrument};

use crate::domain::export::{ExportRow, JobParameters};
use crate::ports::{FlatFileWriter, WriterConfiguration};

use super::{ExportError, ExportRowAssembler};

/// Columns written first, in this order, when present.
const LEADING_COLUMNS: [&str; 3] = ["uuid", "identifier", "family"];

/// Result of a flushed export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub headers: Vec<String>,
    pub rows: usize,
}

pub struct CsvProductWriter {
    assembler: ExportRowAssembler,
    file_writer: Arc<dyn FlatFileWriter>,
    parameters: JobParameters,
    buffer: Vec<BTreeMap<String, String>>,
}

impl CsvProductWriter {
    pub fn new(
        assembler: ExportRowAssembler,
        file_writer: Arc<dyn FlatFileWriter>,
        parameters: JobParameters,
    ) -> Self {
        Self {
            assembler,
            file_writer,
            parameters,
            buffer: Vec::new(),
        }
    }

    pub fn initialize(&mut self) {
        self.assembler.initialize();
        self.buffer.clear();
    }

    /// Output format derived from the job parameters; never adds a BOM.
    pub fn writer_configuration(&self) -> Result<WriterConfiguration, ExportError> {
        Ok(WriterConfiguration::csv(
            self.parameters.delimiter()?,
            self.parameters.enclosure()?,
        ))
    }

    /// Filters, flattens and buffers one batch.
    #[instrument(skip_all, fields(rows = items.len()))]
    pub async fn write(&mut self, items: Vec<ExportRow>) -> Result<(), ExportError> {
        let rows = self.assembler.process(items).await?;
        let with_uuid = self.parameters.with_uuid().unwrap_or(false);

        for row in &rows {
            row.item_identifier()
                .map_err(|_| ExportError::MissingIdentifier)?;
            self.buffer.push(row.flatten(with_uuid));
        }

        Ok(())
    }

    /// Writes the buffered rows with their headers to `filePath`.
    #[instrument(skip_all)]
    pub async fn flush(&mut self) -> Result<ExportSummary, ExportError> {
        let path = self
            .parameters
            .file_path()
            .ok_or(ExportError::MissingFilePath)?;
        let config = self.writer_configuration()?;

        let additional = self.assembler.compute_additional_headers(&self.parameters).await?;
        let headers = merge_headers(&self.buffer, &additional);

        self.file_writer
            .write(&path, &config, &headers, &self.buffer)
            .await?;

        let summary = ExportSummary {
            path,
            headers,
            rows: self.buffer.len(),
        };
        info!(
            path = %summary.path.display(),
            rows = summary.rows,
            columns = summary.headers.len(),
            "Product export written"
        );

        self.buffer.clear();
        Ok(summary)
    }
}

/// Leading columns, then the rows' other columns sorted, then additional
/// headers not already present.
fn merge_headers(rows: &[BTreeMap<String, String>], additional: &[String]) -> Vec<String> {
    let present: BTreeSet<&str> = rows
        .iter()
        .flat_map(|row| row.keys().map(String::as_str))
        .collect();

    let mut headers: Vec<String> = LEADING_COLUMNS
        .iter()
        .filter(|c| present.contains(*c))
        .map(|c| c.to_string())
        .collect();

    headers.extend(
        present
            .iter()
            .filter(|c| !LEADING_COLUMNS.contains(c))
            .map(|c| c.to_string()),
    );

    for header in additional {
        if !headers.contains(header) {
            headers.push(header.clone());
        }
    }

    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn merge_puts_leading_columns_first_and_appends_additional() {
        let rows = vec![
            cells(&[("size", "42"), ("identifier", "a"), ("family", "shoes")]),
            cells(&[("identifier", "b"), ("color", "red")]),
        ];

        let headers = merge_headers(&rows, &["size".to_string(), "weight".to_string()]);

        assert_eq!(headers, vec!["identifier", "family", "color", "size", "weight"]);
    }

    #[test]
    fn merge_with_no_rows_is_additional_only() {
        let headers = merge_headers(&[], &["name-en_US".to_string()]);
        assert_eq!(headers, vec!["name-en_US"]);
    }
}
