//! PDF Builder Port - Converts rendered markup to PDF bytes.
//!
//! The product renderer depends on this trait; adapters (like
//! `CommandPdfBuilder`) provide the conversion.

use async_trait::async_trait;
use thiserror::Error;

/// Port for building a PDF document from HTML markup.
///
/// # Contract
///
/// Implementations must:
/// - Return the bytes of a complete PDF document
/// - Report conversion failures as errors, never as an empty document
#[async_trait]
pub trait PdfBuilder: Send + Sync {
    /// Convert HTML markup to PDF bytes.
    ///
    /// # Errors
    ///
    /// Returns `PdfBuildError` if conversion fails.
    async fn build_pdf_output(&self, markup: &str) -> Result<Vec<u8>, PdfBuildError>;

    /// Check if the builder's backing tool is usable.
    async fn is_available(&self) -> bool;
}

/// Errors that can occur while building a PDF.
#[derive(Debug, Clone, Error)]
pub enum PdfBuildError {
    /// External converter is not available.
    #[error("PDF builder unavailable: {0}")]
    ServiceUnavailable(String),

    /// Conversion failed.
    #[error("PDF conversion failed: {0}")]
    ConversionFailed(String),

    /// Timeout during conversion.
    #[error("PDF conversion timed out after {0} seconds")]
    Timeout(u64),
}

impl PdfBuildError {
    pub fn service_unavailable(reason: impl Into<String>) -> Self {
        Self::ServiceUnavailable(reason.into())
    }

    pub fn conversion_failed(reason: impl Into<String>) -> Self {
        Self::ConversionFailed(reason.into())
    }
}
