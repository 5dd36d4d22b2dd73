//! Product PDF sheet rendering.
//!
//! Selects what the sheet shows for the current actor, warms the image
//! renditions it references, renders the template and converts the markup
//! to PDF.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::domain::catalog::{Attribute, Product};
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::domain::pdf::{
    collect_image_paths, find_attribute, group_attributes, RenderContext, RenderParameters,
    LONG_DESCRIPTION_CODE, PDF_FORMAT, SHORT_DESCRIPTION_CODE, THUMBNAIL_FILTER,
};
use crate::ports::{
    ActorContext, AttributeRepository, PdfBuildError, PdfBuilder, RepositoryError,
    TemplateError, TemplateRenderer, ThumbnailError,
};

use super::{AttributeVisibilityFilter, ThumbnailWarmer};

/// Errors raised while rendering a product sheet.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid render options: {0}")]
    InvalidOptions(#[from] ValidationError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("Could not serialize render parameters: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Thumbnail(#[from] ThumbnailError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    PdfBuild(#[from] PdfBuildError),
}

impl From<RenderError> for DomainError {
    fn from(err: RenderError) -> Self {
        let code = match &err {
            RenderError::InvalidOptions(_) => ErrorCode::ValidationFailed,
            RenderError::Repository(_) => ErrorCode::DatabaseError,
            RenderError::Serialization(_) => ErrorCode::InternalError,
            RenderError::Thumbnail(_) => ErrorCode::ThumbnailError,
            RenderError::Template(TemplateError::NotFound(_)) => ErrorCode::TemplateNotFound,
            RenderError::Template(_) => ErrorCode::TemplateError,
            RenderError::PdfBuild(_) => ErrorCode::PdfBuildError,
        };
        DomainError::new(code, err.to_string())
    }
}

/// Renders one product into PDF bytes.
pub struct ProductPdfRenderer {
    templating: Arc<dyn TemplateRenderer>,
    pdf_builder: Arc<dyn PdfBuilder>,
    thumbnails: ThumbnailWarmer,
    attributes: Arc<dyn AttributeRepository>,
    visibility: AttributeVisibilityFilter,
    actor_context: Arc<dyn ActorContext>,
    template: String,
    custom_font: Option<String>,
    thumbnail_filter: String,
}

impl ProductPdfRenderer {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        templating: Arc<dyn TemplateRenderer>,
        pdf_builder: Arc<dyn PdfBuilder>,
        thumbnails: ThumbnailWarmer,
        attributes: Arc<dyn AttributeRepository>,
        visibility: AttributeVisibilityFilter,
        actor_context: Arc<dyn ActorContext>,
        template: impl Into<String>,
        custom_font: Option<String>,
    ) -> Self {
        Self {
            templating,
            pdf_builder,
            thumbnails,
            attributes,
            visibility,
            actor_context,
            template: template.into(),
            custom_font,
            thumbnail_filter: THUMBNAIL_FILTER.to_string(),
        }
    }

    /// Overrides the default thumbnail filter.
    pub fn with_thumbnail_filter(mut self, filter: impl Into<String>) -> Self {
        self.thumbnail_filter = filter.into();
        self
    }

    pub fn supports(&self, format: &str) -> bool {
        format == PDF_FORMAT
    }

    /// Resolves the template parameters of `product` without rendering.
    pub async fn parameters(
        &self,
        product: &Product,
        context: RenderContext,
    ) -> Result<RenderParameters, RenderError> {
        context.validate()?;
        let locale = context.locale()?.to_string();
        let scope = context.scope()?.to_string();

        let actor = self.actor_context.current_actor();
        let policy = self.visibility.role_aware(actor.as_ref()).await?;

        let codes = product.attribute_codes_with_family();
        let definitions: HashMap<String, Attribute> = self
            .attributes
            .find_by_codes(&codes)
            .await?
            .into_iter()
            .map(|attribute| (attribute.code.clone(), attribute))
            .collect();

        let grouped = group_attributes(
            &codes,
            &definitions,
            &[SHORT_DESCRIPTION_CODE, LONG_DESCRIPTION_CODE],
            &policy,
        );
        let image_paths = collect_image_paths(product, &definitions, &locale, &scope, &policy);
        debug!(
            product = %product.identifier,
            groups = grouped.sections().len(),
            images = image_paths.len(),
            "Product sheet content selected"
        );

        let mut computed = Map::new();
        computed.insert("product".to_string(), serde_json::to_value(product)?);
        computed.insert("groupedAttributes".to_string(), serde_json::to_value(&grouped)?);
        computed.insert("imagePaths".to_string(), serde_json::to_value(&image_paths)?);
        computed.insert(
            "customFont".to_string(),
            self.custom_font.clone().map(Value::String).unwrap_or(Value::Null),
        );
        computed.insert(
            "shortDescription".to_string(),
            serde_json::to_value(find_attribute(SHORT_DESCRIPTION_CODE, &codes, &definitions))?,
        );
        computed.insert(
            "longDescription".to_string(),
            serde_json::to_value(find_attribute(LONG_DESCRIPTION_CODE, &codes, &definitions))?,
        );

        let params = RenderParameters::resolve(context, computed, Utc::now(), &self.thumbnail_filter)?;
        let links = self.thumbnails.rendition_links(&image_paths, params.filter())?;
        Ok(params.with_computed("imageUrls", serde_json::to_value(links)?))
    }

    /// Renders the product sheet and returns the PDF bytes.
    #[instrument(skip_all, fields(product = %product.identifier))]
    pub async fn render(
        &self,
        product: &Product,
        context: RenderContext,
    ) -> Result<Vec<u8>, RenderError> {
        let params = self.parameters(product, context).await?;

        let image_paths: Vec<String> = params
            .get("imagePaths")
            .cloned()
            .map(serde_json::from_value)
            .transpose()?
            .unwrap_or_default();
        self.thumbnails
            .generate_thumbnails_cache(&image_paths, params.filter())
            .await?;

        let markup = self.templating.render(&self.template, &params.as_value()).await?;
        let pdf = self.pdf_builder.build_pdf_output(&markup).await?;

        info!(bytes = pdf.len(), template = %self.template, "Product sheet rendered");
        Ok(pdf)
    }
}
