//! External command PDF builder adapter.
//!
//! Pipes the rendered HTML through an HTML-to-PDF converter (wkhtmltopdf by
//! default) reading stdin and writing stdout.
//!
//! # Example
//!
//! ```rust,ignore
//! let builder = CommandPdfBuilder::new().with_timeout(60);
//! let pdf = builder.build_pdf_output("<html>...</html>").await?;
//! ```

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::ports::{PdfBuildError, PdfBuilder};

const DEFAULT_COMMAND: &str = "wkhtmltopdf";

#[derive(Debug, Clone)]
pub struct CommandPdfBuilder {
    /// Converter executable. Resolved through PATH unless absolute.
    command: String,

    /// Arguments placed before the stdin/stdout markers.
    args: Vec<String>,

    timeout_secs: u64,
}

impl Default for CommandPdfBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandPdfBuilder {
    pub fn new() -> Self {
        Self {
            command: DEFAULT_COMMAND.to_string(),
            args: vec!["--quiet".to_string(), "--encoding".to_string(), "utf-8".to_string()],
            timeout_secs: 30,
        }
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

#[async_trait]
impl PdfBuilder for CommandPdfBuilder {
    async fn build_pdf_output(&self, markup: &str) -> Result<Vec<u8>, PdfBuildError> {
        if !self.is_available().await {
            return Err(PdfBuildError::service_unavailable(format!(
                "'{}' is not installed or not executable",
                self.command
            )));
        }

        let mut child = Command::new(&self.command)
            .args(&self.args)
            .args(["-", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                PdfBuildError::conversion_failed(format!("Failed to start {}: {}", self.command, e))
            })?;

        // Dropping `convert` on timeout drops the child, which kills it.
        let stdin = child.stdin.take();
        let convert = async move {
            let write = async move {
                if let Some(mut stdin) = stdin {
                    stdin.write_all(markup.as_bytes()).await?;
                }
                Ok::<(), std::io::Error>(())
            };
            let (written, output) = tokio::join!(write, child.wait_with_output());
            written.map_err(|e| {
                PdfBuildError::conversion_failed(format!("Failed to write markup: {}", e))
            })?;
            output.map_err(|e| PdfBuildError::conversion_failed(format!("{} failed: {}", self.command, e)))
        };

        let output = tokio::time::timeout(Duration::from_secs(self.timeout_secs), convert)
            .await
            .map_err(|_| PdfBuildError::Timeout(self.timeout_secs))??;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PdfBuildError::conversion_failed(format!(
                "{} returned error: {}",
                self.command,
                stderr.trim()
            )));
        }
        if output.stdout.is_empty() {
            return Err(PdfBuildError::conversion_failed("converter produced no output"));
        }

        debug!(bytes = output.stdout.len(), "PDF built");
        Ok(output.stdout)
    }

    async fn is_available(&self) -> bool {
        Command::new(&self.command)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|status| status.success())
            .unwrap_or(false)
    }
}
