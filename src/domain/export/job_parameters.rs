//! Read-only parameters of an export job.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::foundation::ValidationError;

pub const DEFAULT_DELIMITER: u8 = b';';
pub const DEFAULT_ENCLOSURE: u8 = b'"';

/// Named job parameters, as configured on the export profile.
///
/// Structure filters live under `filters.structure` (`locales`, `scope`,
/// `attributes`); everything else is top level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobParameters(Map<String, Value>);

impl JobParameters {
    pub fn new(parameters: Map<String, Value>) -> Self {
        Self(parameters)
    }

    pub fn has(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    fn structure(&self, key: &str) -> Option<&Value> {
        self.0
            .get("filters")
            .and_then(|f| f.get("structure"))
            .and_then(|s| s.get(key))
            .filter(|v| !v.is_null())
    }

    fn required_str(&self, key: &str) -> Result<String, ValidationError> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| ValidationError::missing_required(key))
    }

    /// `filters.structure.locales`, else the single `locale` parameter.
    pub fn locale_codes(&self) -> Result<Vec<String>, ValidationError> {
        match self.structure("locales") {
            Some(locales) => string_list(locales, "filters.structure.locales"),
            None => Ok(vec![self.required_str("locale")?]),
        }
    }

    /// `filters.structure.scope`, else the `scope` parameter.
    pub fn channel_code(&self) -> Result<String, ValidationError> {
        match self.structure("scope") {
            Some(Value::String(scope)) => Ok(scope.clone()),
            Some(_) => Err(ValidationError::invalid_format(
                "filters.structure.scope",
                "expected a channel code",
            )),
            None => self.required_str("scope"),
        }
    }

    /// Attribute codes selected on the export profile's structure filter.
    pub fn filtered_attribute_codes(&self) -> Result<Vec<String>, ValidationError> {
        match self.structure("attributes") {
            Some(codes) => string_list(codes, "filters.structure.attributes"),
            None => Ok(Vec::new()),
        }
    }

    /// `selected_properties` when the parameter is defined, even if empty.
    pub fn selected_properties(&self) -> Result<Option<Vec<String>>, ValidationError> {
        match self.0.get("selected_properties") {
            None => Ok(None),
            Some(Value::Null) => Ok(Some(Vec::new())),
            Some(codes) => string_list(codes, "selected_properties").map(Some),
        }
    }

    /// Media columns are exported unless `with_media` is explicitly falsy.
    pub fn with_media(&self) -> bool {
        match self.0.get("with_media") {
            None => true,
            Some(value) => is_truthy(value),
        }
    }

    pub fn with_uuid(&self) -> Option<bool> {
        self.0.get("with_uuid").map(is_truthy)
    }

    pub fn delimiter(&self) -> Result<u8, ValidationError> {
        single_byte(self.0.get("delimiter"), "delimiter", DEFAULT_DELIMITER)
    }

    pub fn enclosure(&self) -> Result<u8, ValidationError> {
        single_byte(self.0.get("enclosure"), "enclosure", DEFAULT_ENCLOSURE)
    }

    pub fn file_path(&self) -> Option<PathBuf> {
        self.0
            .get("filePath")
            .and_then(Value::as_str)
            .map(PathBuf::from)
    }
}

fn string_list(value: &Value, field: &str) -> Result<Vec<String>, ValidationError> {
    let items = value
        .as_array()
        .ok_or_else(|| ValidationError::invalid_format(field, "expected a list of codes"))?;

    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| ValidationError::invalid_format(field, "expected string codes"))
        })
        .collect()
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn single_byte(value: Option<&Value>, field: &str, default: u8) -> Result<u8, ValidationError> {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        return Ok(default);
    };

    match value.as_str().map(str::as_bytes) {
        Some([byte]) => Ok(*byte),
        _ => Err(ValidationError::invalid_format(field, "must be a single character")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> JobParameters {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn structure_filters_take_precedence_over_top_level() {
        let p = params(json!({
            "locale": "en_US",
            "scope": "mobile",
            "filters": { "structure": { "locales": ["fr_FR", "de_DE"], "scope": "ecommerce" } }
        }));

        assert_eq!(p.locale_codes().unwrap(), vec!["fr_FR", "de_DE"]);
        assert_eq!(p.channel_code().unwrap(), "ecommerce");
    }

    #[test]
    fn falls_back_to_locale_and_scope() {
        let p = params(json!({ "locale": "en_US", "scope": "mobile", "filters": {} }));

        assert_eq!(p.locale_codes().unwrap(), vec!["en_US"]);
        assert_eq!(p.channel_code().unwrap(), "mobile");
    }

    #[test]
    fn missing_fallbacks_are_validation_errors() {
        let p = params(json!({}));

        assert_eq!(p.locale_codes(), Err(ValidationError::missing_required("locale")));
        assert_eq!(p.channel_code(), Err(ValidationError::missing_required("scope")));
    }

    #[test]
    fn selected_properties_distinguishes_absent_from_empty() {
        assert_eq!(params(json!({})).selected_properties().unwrap(), None);
        assert_eq!(
            params(json!({ "selected_properties": null })).selected_properties().unwrap(),
            Some(vec![])
        );
        assert_eq!(
            params(json!({ "selected_properties": ["name"] })).selected_properties().unwrap(),
            Some(vec!["name".to_string()])
        );
    }

    #[test]
    fn with_media_defaults_to_true() {
        assert!(params(json!({})).with_media());
        assert!(params(json!({ "with_media": true })).with_media());
        assert!(!params(json!({ "with_media": false })).with_media());
        assert!(!params(json!({ "with_media": null })).with_media());
    }

    #[test]
    fn with_uuid_is_unset_unless_given() {
        assert_eq!(params(json!({})).with_uuid(), None);
        assert_eq!(params(json!({ "with_uuid": true })).with_uuid(), Some(true));
    }

    #[test]
    fn delimiter_and_enclosure_default_and_validate() {
        let p = params(json!({}));
        assert_eq!(p.delimiter().unwrap(), b';');
        assert_eq!(p.enclosure().unwrap(), b'"');

        let p = params(json!({ "delimiter": ",", "enclosure": "'" }));
        assert_eq!(p.delimiter().unwrap(), b',');
        assert_eq!(p.enclosure().unwrap(), b'\'');

        assert!(params(json!({ "delimiter": ";;" })).delimiter().is_err());
    }

    #[test]
    fn loads_from_yaml_profile() {
        let p: JobParameters = serde_yaml::from_str(
            "locale: en_US\nscope: ecommerce\nwith_media: false\nfilePath: /tmp/export.csv\n",
        )
        .unwrap();

        assert!(!p.with_media());
        assert_eq!(p.file_path(), Some(PathBuf::from("/tmp/export.csv")));
    }
}
