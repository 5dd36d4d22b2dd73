//! Template adapters - `TemplateRenderer` implementations.

mod minijinja_renderer;

pub use minijinja_renderer::{MiniJinjaTemplateRenderer, PRODUCT_SHEET_TEMPLATE};
