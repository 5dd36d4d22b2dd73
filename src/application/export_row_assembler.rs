//! Export row assembly: strips hidden values from product rows, remembers
//! the families seen and derives the additional CSV headers.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, instrument};

use crate::domain::export::{ExportRow, ExportRunState, JobParameters};
use crate::domain::foundation::{DomainError, ErrorCode, StateMachine, ValidationError};
use crate::domain::visibility::{UnconditionalVisibility, VisibilityPolicy, VisibilitySet};
use crate::ports::{FlatFileError, HeaderGenerator, RepositoryError};

use super::AttributeVisibilityFilter;

/// Errors raised while exporting products to a flat file.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Invalid export parameters: {0}")]
    InvalidParameters(#[from] ValidationError),

    #[error("Malformed row '{identifier}': {reason}")]
    MalformedRow { identifier: String, reason: String },

    #[error("Row has neither an identifier nor a uuid")]
    MissingIdentifier,

    #[error("No output file path configured")]
    MissingFilePath,

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    FlatFile(#[from] FlatFileError),
}

impl From<ExportError> for DomainError {
    fn from(err: ExportError) -> Self {
        let code = match &err {
            ExportError::InvalidParameters(_) | ExportError::MissingFilePath => {
                ErrorCode::ValidationFailed
            }
            ExportError::MalformedRow { .. } => ErrorCode::MalformedRow,
            ExportError::MissingIdentifier => ErrorCode::MissingIdentifier,
            ExportError::Repository(_) => ErrorCode::DatabaseError,
            ExportError::FlatFile(_) => ErrorCode::FileWriteError,
        };
        DomainError::new(code, err.to_string())
    }
}

/// Per-run row filter and family tracker.
///
/// State (`family_codes`, run state) lives for one export run and is reset by
/// [`ExportRowAssembler::initialize`].
pub struct ExportRowAssembler {
    visibility: AttributeVisibilityFilter,
    header_generator: Arc<dyn HeaderGenerator>,
    family_codes: Vec<String>,
    state: ExportRunState,
}

impl ExportRowAssembler {
    pub fn new(
        visibility: AttributeVisibilityFilter,
        header_generator: Arc<dyn HeaderGenerator>,
    ) -> Self {
        Self {
            visibility,
            header_generator,
            family_codes: Vec::new(),
            state: ExportRunState::NotStarted,
        }
    }

    /// Starts a new run.
    pub fn initialize(&mut self) {
        self.family_codes.clear();
        self.state = ExportRunState::NotStarted;
    }

    pub fn state(&self) -> ExportRunState {
        self.state
    }

    /// Distinct families seen so far in this run.
    pub fn family_codes(&self) -> &[String] {
        &self.family_codes
    }

    /// Removes hidden values from every row and records their families.
    #[instrument(skip_all, fields(rows = batch.len()))]
    pub async fn process(&mut self, mut batch: Vec<ExportRow>) -> Result<Vec<ExportRow>, ExportError> {
        let policy = self.visibility.unconditional().await?;
        self.state = self.state.transition_to(ExportRunState::Started)?;

        let mut removed = 0;
        for row in batch.iter_mut() {
            removed += strip_hidden_values(row, &policy)?;

            if let Some(family) = &row.family {
                if !self.family_codes.contains(family) {
                    self.family_codes.push(family.clone());
                }
            }
        }

        debug!(removed, families = self.family_codes.len(), "Processed export batch");
        Ok(batch)
    }

    /// Headers to add to the file beyond those of the written rows.
    ///
    /// Attribute codes from the profile's structure filter win once a batch
    /// was processed; otherwise `selected_properties`; otherwise the families
    /// observed so far.
    #[instrument(skip_all)]
    pub async fn compute_additional_headers(
        &self,
        parameters: &JobParameters,
    ) -> Result<Vec<String>, ExportError> {
        let locale_codes = parameters.locale_codes()?;
        let channel_code = parameters.channel_code()?;

        let filtered = parameters.filtered_attribute_codes()?;
        let attribute_codes = if !filtered.is_empty() && self.state.has_items() {
            filtered
        } else {
            parameters.selected_properties()?.unwrap_or_default()
        };

        let headers = if !attribute_codes.is_empty() {
            self.header_generator
                .from_attribute_codes(&attribute_codes, &channel_code, &locale_codes)
                .await?
        } else if !self.family_codes.is_empty() {
            self.header_generator
                .from_family_codes(&self.family_codes, &channel_code, &locale_codes)
                .await?
        } else {
            Vec::new()
        };

        let with_media = parameters.with_media();
        let hidden = self.visibility.visibility_set().await?;

        let header_strings: Vec<String> = headers
            .iter()
            .filter(|header| with_media || !header.is_media())
            .filter(|header| !hidden.contains(&header.attribute_code))
            .flat_map(|header| header.generate_header_strings())
            .filter(|header| !hidden.contains(header))
            .collect();

        debug!(count = header_strings.len(), "Computed additional headers");
        Ok(header_strings)
    }
}

/// Removes the row's values the policy hides; idempotent.
pub fn strip_hidden_values(
    row: &mut ExportRow,
    policy: &UnconditionalVisibility,
) -> Result<usize, ExportError> {
    row.remove_values(|code| !policy.is_visible(code, None, true))
        .map_err(|e| ExportError::MalformedRow {
            identifier: row_label(row),
            reason: e.to_string(),
        })
}

/// Same as [`strip_hidden_values`] for a bare visibility set.
pub fn strip_values_in(row: &mut ExportRow, hidden: &VisibilitySet) -> Result<usize, ExportError> {
    strip_hidden_values(row, &UnconditionalVisibility::new(hidden.clone()))
}

fn row_label(row: &ExportRow) -> String {
    row.item_identifier().unwrap_or_else(|_| "<unidentified>".to_string())
}
