//! Flat File Writer Port - Persists header and rows of an export.

use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::export::{DEFAULT_DELIMITER, DEFAULT_ENCLOSURE};

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriterConfiguration {
    pub field_delimiter: u8,
    pub field_enclosure: u8,
    pub add_bom: bool,
}

impl WriterConfiguration {
    /// CSV with the given delimiter and enclosure; a BOM is never written.
    pub fn csv(field_delimiter: u8, field_enclosure: u8) -> Self {
        Self {
            field_delimiter,
            field_enclosure,
            add_bom: false,
        }
    }
}

impl Default for WriterConfiguration {
    fn default() -> Self {
        Self::csv(DEFAULT_DELIMITER, DEFAULT_ENCLOSURE)
    }
}

/// Errors that can occur while writing a flat file.
#[derive(Debug, Error)]
pub enum FlatFileError {
    #[error("I/O error writing '{path}': {reason}")]
    Io { path: String, reason: String },

    #[error("Encoding error: {0}")]
    Encoding(String),
}

/// Port writing one flat file: a header line, then one line per row with
/// cells ordered by `headers` (missing cells are empty).
#[async_trait]
pub trait FlatFileWriter: Send + Sync {
    async fn write(
        &self,
        path: &Path,
        config: &WriterConfiguration,
        headers: &[String],
        rows: &[BTreeMap<String, String>],
    ) -> Result<(), FlatFileError>;
}
