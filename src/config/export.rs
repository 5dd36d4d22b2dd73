//! CSV export configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Defaults of the product CSV export
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// YAML file replacing the built-in ignored attribute list
    #[serde(default)]
    pub ignored_attributes_file: Option<PathBuf>,

    /// Field delimiter used when the job does not set one
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Field enclosure used when the job does not set one
    #[serde(default = "default_enclosure")]
    pub enclosure: String,
}

impl ExportConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_single_ascii(&self.delimiter) {
            return Err(ValidationError::InvalidCsvCharacter("delimiter"));
        }
        if !is_single_ascii(&self.enclosure) {
            return Err(ValidationError::InvalidCsvCharacter("enclosure"));
        }
        Ok(())
    }
}

fn is_single_ascii(value: &str) -> bool {
    value.len() == 1 && value.is_ascii()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            ignored_attributes_file: None,
            delimiter: default_delimiter(),
            enclosure: default_enclosure(),
        }
    }
}

fn default_delimiter() -> String {
    ";".to_string()
}

fn default_enclosure() -> String {
    "\"".to_string()
}
