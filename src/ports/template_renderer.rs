//! Template Renderer Port - Turns named templates and parameters into markup.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while rendering a template.
#[derive(Debug, Clone, Error)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template rendering failed: {0}")]
    RenderFailed(String),
}

impl TemplateError {
    pub fn render_failed(reason: impl Into<String>) -> Self {
        Self::RenderFailed(reason.into())
    }
}

/// Port for the templating engine.
///
/// ```rust,ignore
/// let html = renderer.render("product.html.j2", &params.as_value()).await?;
/// ```
#[async_trait]
pub trait TemplateRenderer: Send + Sync {
    async fn render(&self, template: &str, params: &Value) -> Result<String, TemplateError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_error_displays_messages() {
        assert!(TemplateError::NotFound("sheet.j2".into())
            .to_string()
            .contains("sheet.j2"));
        assert!(TemplateError::render_failed("undefined variable")
            .to_string()
            .contains("rendering failed"));
    }

    #[test]
    fn template_renderer_is_object_safe() {
        fn check<T: TemplateRenderer + ?Sized>() {}
        check::<dyn TemplateRenderer>();
    }
}
