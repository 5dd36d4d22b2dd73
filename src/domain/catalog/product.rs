//! Products and their values.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Family;

/// Reference to binary media stored by the PIM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaFile {
    /// Storage key, also used as the thumbnail cache path.
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_filename: Option<String>,
}

impl MediaFile {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            original_filename: None,
        }
    }
}

/// Typed payload of a product value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueData {
    Boolean(bool),
    Number(serde_json::Number),
    Text(String),
    Options(Vec<String>),
    Media(MediaFile),
    /// Metrics, prices and anything else kept in its raw shape.
    Structured(serde_json::Value),
}

impl ValueData {
    pub fn as_media(&self) -> Option<&MediaFile> {
        match self {
            ValueData::Media(media) => Some(media),
            _ => None,
        }
    }
}

/// One value of a product, optionally localized and scoped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductValue {
    pub attribute: String,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    pub data: ValueData,
}

impl ProductValue {
    pub fn new(attribute: impl Into<String>, data: ValueData) -> Self {
        Self {
            attribute: attribute.into(),
            locale: None,
            scope: None,
            data,
        }
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub identifier: String,
    #[serde(default)]
    pub uuid: Option<Uuid>,
    #[serde(default)]
    pub family: Option<Family>,
    #[serde(default)]
    pub values: Vec<ProductValue>,
}

impl Product {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            uuid: None,
            family: None,
            values: Vec::new(),
        }
    }

    pub fn with_family(mut self, family: Family) -> Self {
        self.family = Some(family);
        self
    }

    pub fn with_value(mut self, value: ProductValue) -> Self {
        self.values.push(value);
        self
    }

    /// Codes of the attributes that carry a value, in first-seen order.
    pub fn used_attribute_codes(&self) -> Vec<String> {
        let mut codes: Vec<String> = Vec::new();
        for value in &self.values {
            if !codes.contains(&value.attribute) {
                codes.push(value.attribute.clone());
            }
        }
        codes
    }

    /// Used attribute codes followed by the family's codes, de-duplicated.
    pub fn attribute_codes_with_family(&self) -> Vec<String> {
        let mut codes = self.used_attribute_codes();
        if let Some(family) = &self.family {
            for code in &family.attribute_codes {
                if !codes.contains(code) {
                    codes.push(code.clone());
                }
            }
        }
        codes
    }

    /// Looks up the value for an attribute in an exact locale/scope context.
    pub fn get_value(
        &self,
        attribute: &str,
        locale: Option<&str>,
        scope: Option<&str>,
    ) -> Option<&ProductValue> {
        self.values.iter().find(|value| {
            value.attribute == attribute
                && value.locale.as_deref() == locale
                && value.scope.as_deref() == scope
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(code: &str) -> ProductValue {
        ProductValue::new(code, ValueData::Text("x".to_string()))
    }

    #[test]
    fn used_attribute_codes_are_deduplicated_in_order() {
        let product = Product::new("sku-1")
            .with_value(text("name").with_locale("en_US"))
            .with_value(text("size"))
            .with_value(text("name").with_locale("fr_FR"));

        assert_eq!(product.used_attribute_codes(), vec!["name", "size"]);
    }

    #[test]
    fn family_codes_are_appended_after_used_codes() {
        let product = Product::new("sku-1")
            .with_family(Family::new("shoes", vec!["size".into(), "color".into()]))
            .with_value(text("name"))
            .with_value(text("size"));

        assert_eq!(
            product.attribute_codes_with_family(),
            vec!["name", "size", "color"]
        );
    }

    #[test]
    fn get_value_matches_exact_locale_and_scope() {
        let product = Product::new("sku-1")
            .with_value(text("name").with_locale("en_US").with_scope("ecommerce"))
            .with_value(text("name").with_locale("fr_FR").with_scope("ecommerce"));

        let value = product.get_value("name", Some("fr_FR"), Some("ecommerce")).unwrap();
        assert_eq!(value.locale.as_deref(), Some("fr_FR"));
        assert!(product.get_value("name", None, Some("ecommerce")).is_none());
    }

    #[test]
    fn value_data_deserializes_media_and_structured_payloads() {
        let media: ValueData = serde_json::from_str(r#"{"key": "a/b/img1.jpg"}"#).unwrap();
        assert_eq!(media.as_media().unwrap().key, "a/b/img1.jpg");

        let metric: ValueData =
            serde_json::from_str(r#"{"amount": "12", "unit": "KILOGRAM"}"#).unwrap();
        assert!(matches!(metric, ValueData::Structured(_)));

        let options: ValueData = serde_json::from_str(r#"["red", "blue"]"#).unwrap();
        assert_eq!(options, ValueData::Options(vec!["red".into(), "blue".into()]));
    }
}
