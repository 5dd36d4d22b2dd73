//! Attribute definitions and attribute groups.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Code of the attribute group whose attributes are hidden from public outputs.
pub const NOT_PUBLIC_GROUP_CODE: &str = "notpublic";

/// Type of a catalog attribute, as stored by the PIM.
///
/// Types this crate has no special handling for (asset collections,
/// reference data, tables, ...) keep their storage name in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AttributeType {
    Identifier,
    Text,
    TextArea,
    Number,
    Boolean,
    Date,
    SimpleSelect,
    MultiSelect,
    Metric,
    PriceCollection,
    Image,
    File,
    Other(String),
}

impl AttributeType {
    /// Storage name of the type.
    pub fn as_str(&self) -> &str {
        match self {
            AttributeType::Identifier => "pim_catalog_identifier",
            AttributeType::Text => "pim_catalog_text",
            AttributeType::TextArea => "pim_catalog_textarea",
            AttributeType::Number => "pim_catalog_number",
            AttributeType::Boolean => "pim_catalog_boolean",
            AttributeType::Date => "pim_catalog_date",
            AttributeType::SimpleSelect => "pim_catalog_simpleselect",
            AttributeType::MultiSelect => "pim_catalog_multiselect",
            AttributeType::Metric => "pim_catalog_metric",
            AttributeType::PriceCollection => "pim_catalog_price_collection",
            AttributeType::Image => "pim_catalog_image",
            AttributeType::File => "pim_catalog_file",
            AttributeType::Other(name) => name.as_str(),
        }
    }

    /// Media types carry binary files and produce media export columns.
    pub fn is_media(&self) -> bool {
        matches!(self, AttributeType::Image | AttributeType::File)
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for AttributeType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "pim_catalog_identifier" => AttributeType::Identifier,
            "pim_catalog_text" => AttributeType::Text,
            "pim_catalog_textarea" => AttributeType::TextArea,
            "pim_catalog_number" => AttributeType::Number,
            "pim_catalog_boolean" => AttributeType::Boolean,
            "pim_catalog_date" => AttributeType::Date,
            "pim_catalog_simpleselect" => AttributeType::SimpleSelect,
            "pim_catalog_multiselect" => AttributeType::MultiSelect,
            "pim_catalog_metric" => AttributeType::Metric,
            "pim_catalog_price_collection" => AttributeType::PriceCollection,
            "pim_catalog_image" => AttributeType::Image,
            "pim_catalog_file" => AttributeType::File,
            _ => AttributeType::Other(name),
        }
    }
}

impl From<AttributeType> for String {
    fn from(attribute_type: AttributeType) -> Self {
        match attribute_type {
            AttributeType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for AttributeType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(AttributeType::from(s.to_string()))
    }
}

/// Named bucket of attributes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeGroup {
    pub code: String,
    pub label: String,
}

impl AttributeGroup {
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
        }
    }

    /// True for the restricted `notpublic` group.
    pub fn is_not_public(&self) -> bool {
        self.code == NOT_PUBLIC_GROUP_CODE
    }
}

/// A typed field definable on products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub code: String,
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
    pub group: AttributeGroup,
    #[serde(default)]
    pub localizable: bool,
    #[serde(default)]
    pub scopable: bool,
    /// Currencies for price collections, unit-less otherwise.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub currencies: Vec<String>,
}

impl Attribute {
    /// Creates a non-localizable, non-scopable attribute.
    pub fn new(code: impl Into<String>, attribute_type: AttributeType, group: AttributeGroup) -> Self {
        Self {
            code: code.into(),
            attribute_type,
            group,
            localizable: false,
            scopable: false,
            currencies: Vec::new(),
        }
    }

    pub fn localizable(mut self) -> Self {
        self.localizable = true;
        self
    }

    pub fn scopable(mut self) -> Self {
        self.scopable = true;
        self
    }

    pub fn with_currencies(mut self, currencies: Vec<String>) -> Self {
        self.currencies = currencies;
        self
    }

    pub fn is_image(&self) -> bool {
        self.attribute_type == AttributeType::Image
    }
}
