//! Product sheet configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct PdfConfig {
    /// Directory of sheet templates; the bundled template is used when unset
    #[serde(default)]
    pub template_dir: Option<PathBuf>,

    /// Template rendered for each product
    #[serde(default = "default_template")]
    pub template: String,

    /// Font family passed to the template as `customFont`
    #[serde(default)]
    pub custom_font: Option<String>,

    /// HTML-to-PDF converter executable
    #[serde(default = "default_command")]
    pub command: String,

    /// Conversion timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl PdfConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.template.is_empty() {
            return Err(ValidationError::MissingRequired("PDF_TEMPLATE"));
        }
        if self.command.is_empty() {
            return Err(ValidationError::MissingRequired("PDF_COMMAND"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 600 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            template_dir: None,
            template: default_template(),
            custom_font: None,
            command: default_command(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_template() -> String {
    "product.html.j2".to_string()
}

fn default_command() -> String {
    "wkhtmltopdf".to_string()
}

fn default_timeout() -> u64 {
    30
}
