//! Parameters passed to the product sheet template.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::domain::foundation::ValidationError;

/// Format handled by the product renderer.
pub const PDF_FORMAT: &str = "pdf";

/// Default thumbnail filter applied to product images.
pub const THUMBNAIL_FILTER: &str = "pdf_thumbnail_large";

const REQUIRED: [&str; 3] = ["locale", "scope", "product"];
const DEFAULTED: [&str; 2] = ["renderingDate", "filter"];
const DEFINED: [&str; 6] = [
    "groupedAttributes",
    "imagePaths",
    "imageUrls",
    "customFont",
    "longDescription",
    "shortDescription",
];

fn is_known_option(key: &str) -> bool {
    REQUIRED.contains(&key) || DEFAULTED.contains(&key) || DEFINED.contains(&key)
}

/// Context supplied by the caller of a render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderContext(Map<String, Value>);

impl RenderContext {
    pub fn new(locale: impl Into<String>, scope: impl Into<String>) -> Self {
        let mut map = Map::new();
        map.insert("locale".to_string(), Value::String(locale.into()));
        map.insert("scope".to_string(), Value::String(scope.into()));
        Self(map)
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    /// Rejects undefined options and missing `locale`/`scope` before any
    /// rendering work happens. `product` is provided by the renderer.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(key) = self.0.keys().find(|k| !is_known_option(k)) {
            return Err(ValidationError::undefined_option(key.as_str()));
        }
        self.locale()?;
        self.scope()?;
        Ok(())
    }

    pub fn locale(&self) -> Result<&str, ValidationError> {
        self.required_str("locale")
    }

    pub fn scope(&self) -> Result<&str, ValidationError> {
        self.required_str("scope")
    }

    fn required_str(&self, key: &str) -> Result<&str, ValidationError> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .ok_or_else(|| ValidationError::missing_required(key))
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

/// Fully resolved template parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderParameters(Map<String, Value>);

impl RenderParameters {
    /// Merges computed values over the caller context (computed keys win),
    /// checks required and undefined options and fills the defaults.
    pub fn resolve(
        context: RenderContext,
        computed: Map<String, Value>,
        now: DateTime<Utc>,
        default_filter: &str,
    ) -> Result<Self, ValidationError> {
        let mut params = context.into_map();
        params.extend(computed);

        if let Some(key) = params.keys().find(|k| !is_known_option(k)) {
            return Err(ValidationError::undefined_option(key.as_str()));
        }
        if let Some(missing) = REQUIRED.iter().find(|k| !params.contains_key(**k)) {
            return Err(ValidationError::missing_required(*missing));
        }

        params
            .entry("renderingDate")
            .or_insert_with(|| Value::String(now.to_rfc3339()));
        params
            .entry("filter")
            .or_insert_with(|| Value::String(default_filter.to_string()));

        Ok(Self(params))
    }

    /// Adds a value that can only be computed once the options are resolved,
    /// such as rendition URLs depending on the final `filter`.
    pub fn with_computed(mut self, key: &'static str, value: Value) -> Self {
        self.0.insert(key.to_string(), value);
        self
    }

    pub fn filter(&self) -> &str {
        self.0.get("filter").and_then(Value::as_str).unwrap_or(THUMBNAIL_FILTER)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}
