//! CSV file writer adapter.
//!
//! Serializes the export with the `csv` crate in memory, then writes the
//! file in one go. Parent directories are created as needed.

use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use tokio::fs;

use crate::ports::{FlatFileError, FlatFileWriter, WriterConfiguration};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone, Default)]
pub struct CsvFileWriter;

impl CsvFileWriter {
    pub fn new() -> Self {
        Self
    }

    /// Encodes headers and rows; cells missing from a row are left empty.
    pub fn encode(
        config: &WriterConfiguration,
        headers: &[String],
        rows: &[BTreeMap<String, String>],
    ) -> Result<Vec<u8>, FlatFileError> {
        let mut out = Vec::new();
        if config.add_bom {
            out.extend_from_slice(UTF8_BOM);
        }

        let mut writer = ::csv::WriterBuilder::new()
            .delimiter(config.field_delimiter)
            .quote(config.field_enclosure)
            .from_writer(out);

        writer
            .write_record(headers)
            .map_err(|e| FlatFileError::Encoding(e.to_string()))?;

        for row in rows {
            let record = headers
                .iter()
                .map(|header| row.get(header).map(String::as_str).unwrap_or(""));
            writer
                .write_record(record)
                .map_err(|e| FlatFileError::Encoding(e.to_string()))?;
        }

        writer
            .into_inner()
            .map_err(|e| FlatFileError::Encoding(e.to_string()))
    }
}

#[async_trait]
impl FlatFileWriter for CsvFileWriter {
    async fn write(
        &self,
        path: &Path,
        config: &WriterConfiguration,
        headers: &[String],
        rows: &[BTreeMap<String, String>],
    ) -> Result<(), FlatFileError> {
        let bytes = Self::encode(config, headers, rows)?;
        let io_error = |e: std::io::Error| FlatFileError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(io_error)?;
        }
        fs::write(path, bytes).await.map_err(io_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn row(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn headers(items: &[&str]) -> Vec<String> {
        items.iter().map(|h| h.to_string()).collect()
    }

    #[test]
    fn encodes_with_configured_delimiter_and_empty_missing_cells() {
        let bytes = CsvFileWriter::encode(
            &WriterConfiguration::csv(b';', b'"'),
            &headers(&["identifier", "size", "name"]),
            &[row(&[("identifier", "sku-1"), ("name", "Runner; deluxe")])],
        )
        .unwrap();

        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "identifier;size;name\nsku-1;;\"Runner; deluxe\"\n"
        );
    }

    #[test]
    fn never_starts_with_bom_by_default() {
        let bytes = CsvFileWriter::encode(&WriterConfiguration::default(), &headers(&["a"]), &[])
            .unwrap();
        assert!(!bytes.starts_with(UTF8_BOM));
    }

    #[test]
    fn uses_configured_enclosure() {
        let bytes = CsvFileWriter::encode(
            &WriterConfiguration::csv(b',', b'\''),
            &headers(&["name"]),
            &[row(&[("name", "a,b")])],
        )
        .unwrap();

        assert_eq!(String::from_utf8(bytes).unwrap(), "name\n'a,b'\n");
    }

    #[tokio::test]
    async fn writes_file_creating_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("exports/products.csv");

        CsvFileWriter::new()
            .write(
                &path,
                &WriterConfiguration::default(),
                &headers(&["identifier"]),
                &[row(&[("identifier", "sku-1")])],
            )
            .await
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "identifier\nsku-1\n");
    }
}
