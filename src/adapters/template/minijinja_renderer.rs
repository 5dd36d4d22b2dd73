//! MiniJinja template renderer adapter.
//!
//! Templates are loaded from a directory when one is configured; otherwise
//! the bundled product sheet template is the only one available. HTML
//! templates (`*.html.j2`) are auto-escaped.

use std::path::Path;

use async_trait::async_trait;
use minijinja::{path_loader, Environment, ErrorKind};
use serde_json::Value;

use crate::ports::{TemplateError, TemplateRenderer};

/// Name of the bundled product sheet template.
pub const PRODUCT_SHEET_TEMPLATE: &str = "product.html.j2";

const PRODUCT_SHEET_SOURCE: &str = include_str!("../../../templates/product.html.j2");

pub struct MiniJinjaTemplateRenderer {
    env: Environment<'static>,
}

impl MiniJinjaTemplateRenderer {
    /// Renderer serving only the bundled templates.
    pub fn bundled() -> Result<Self, TemplateError> {
        let mut env = Environment::new();
        env.add_template(PRODUCT_SHEET_TEMPLATE, PRODUCT_SHEET_SOURCE)
            .map_err(|e| TemplateError::render_failed(e.to_string()))?;
        Ok(Self { env })
    }

    /// Renderer loading templates from `dir` by file name.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let mut env = Environment::new();
        env.set_loader(path_loader(dir.as_ref().to_path_buf()));
        Self { env }
    }

    /// Registers an inline template, replacing any template of that name.
    pub fn with_template(mut self, name: &str, source: &str) -> Result<Self, TemplateError> {
        self.env
            .add_template_owned(name.to_string(), source.to_string())
            .map_err(|e| TemplateError::render_failed(e.to_string()))?;
        Ok(self)
    }

    fn render_sync(&self, template: &str, params: &Value) -> Result<String, TemplateError> {
        let tmpl = self.env.get_template(template).map_err(|e| match e.kind() {
            ErrorKind::TemplateNotFound => TemplateError::NotFound(template.to_string()),
            _ => TemplateError::render_failed(e.to_string()),
        })?;

        tmpl.render(params)
            .map_err(|e| TemplateError::render_failed(format!("{}: {}", template, e)))
    }
}

#[async_trait]
impl TemplateRenderer for MiniJinjaTemplateRenderer {
    async fn render(&self, template: &str, params: &Value) -> Result<String, TemplateError> {
        self.render_sync(template, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn sheet_params() -> Value {
        json!({
            "locale": "en_US",
            "scope": "ecommerce",
            "renderingDate": "2024-05-01T10:00:00+00:00",
            "filter": "pdf_thumbnail_large",
            "product": {"identifier": "sku-<1>", "values": []},
            "groupedAttributes": [
                {"label": "Technical", "attributes": [{"code": "size", "type": "pim_catalog_text",
                    "group": {"code": "technical", "label": "Technical"}}]}
            ],
            "imagePaths": ["img2.jpg"],
            "imageUrls": [{"path": "img2.jpg", "url": "file:///cache/pdf_thumbnail_large/img2.jpg"}],
            "customFont": null,
            "shortDescription": null,
            "longDescription": null
        })
    }

    #[tokio::test]
    async fn bundled_sheet_renders_groups_and_escapes() {
        let renderer = MiniJinjaTemplateRenderer::bundled().unwrap();

        let html = renderer
            .render(PRODUCT_SHEET_TEMPLATE, &sheet_params())
            .await
            .unwrap();

        assert!(html.contains("Technical"));
        assert!(html.contains("size"));
        assert!(html.contains("img2.jpg"));
        assert!(html.contains("sku-&lt;1&gt;"));
        assert!(html.contains("pdf_thumbnail_large&#x2f;img2.jpg"));
    }

    #[tokio::test]
    async fn value_cells_keep_only_the_rendered_locale_and_scope() {
        let renderer = MiniJinjaTemplateRenderer::bundled().unwrap();
        let mut params = sheet_params();
        params["product"]["values"] = json!([
            {"attribute": "size", "locale": "en_US", "scope": null, "data": "Large"},
            {"attribute": "size", "locale": "fr_FR", "scope": null, "data": "Grand"},
            {"attribute": "size", "locale": null, "scope": "mobile", "data": "L"}
        ]);

        let html = renderer.render(PRODUCT_SHEET_TEMPLATE, &params).await.unwrap();

        assert!(html.contains("<td>Large</td>"));
        assert!(!html.contains("Grand"));
        assert!(!html.contains(">L<"));
    }

    #[tokio::test]
    async fn unknown_template_is_not_found() {
        let renderer = MiniJinjaTemplateRenderer::bundled().unwrap();

        let err = renderer.render("missing.html.j2", &json!({})).await.unwrap_err();

        assert!(matches!(err, TemplateError::NotFound(name) if name == "missing.html.j2"));
    }

    #[tokio::test]
    async fn loads_templates_from_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("sheet.html.j2"), "<h1>{{ product.identifier }}</h1>").unwrap();

        let renderer = MiniJinjaTemplateRenderer::from_dir(dir.path());
        let html = renderer
            .render("sheet.html.j2", &json!({"product": {"identifier": "sku-1"}}))
            .await
            .unwrap();

        assert_eq!(html, "<h1>sku-1</h1>");
    }

    #[tokio::test]
    async fn inline_template_overrides() {
        let renderer = MiniJinjaTemplateRenderer::bundled()
            .unwrap()
            .with_template(PRODUCT_SHEET_TEMPLATE, "{{ locale }}")
            .unwrap();

        let html = renderer
            .render(PRODUCT_SHEET_TEMPLATE, &sheet_params())
            .await
            .unwrap();

        assert_eq!(html, "en_US");
    }
}
