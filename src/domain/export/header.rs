//! Self-describing flat file columns.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::{Attribute, AttributeType};

/// One attribute's export column definition, expanded per locale, channel,
/// currency or unit into literal header strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatHeader {
    pub attribute_code: String,
    pub attribute_type: AttributeType,
    pub localizable: bool,
    pub scopable: bool,
    pub locale_codes: Vec<String>,
    pub channel_code: Option<String>,
    pub currencies: Vec<String>,
}

impl FlatHeader {
    pub fn from_attribute(attribute: &Attribute, channel_code: &str, locale_codes: &[String]) -> Self {
        Self {
            attribute_code: attribute.code.clone(),
            attribute_type: attribute.attribute_type.clone(),
            localizable: attribute.localizable,
            scopable: attribute.scopable,
            locale_codes: locale_codes.to_vec(),
            channel_code: Some(channel_code.to_string()),
            currencies: attribute.currencies.clone(),
        }
    }

    pub fn is_media(&self) -> bool {
        self.attribute_type.is_media()
    }

    /// Literal column names, e.g. `name-en_US-ecommerce`, `price-EUR`,
    /// `weight-unit`.
    pub fn generate_header_strings(&self) -> Vec<String> {
        let mut prefixes = Vec::new();
        let channel = self.channel_code.as_deref().filter(|_| self.scopable);

        if self.localizable {
            for locale in &self.locale_codes {
                match channel {
                    Some(channel) => prefixes.push(format!("{}-{}-{}", self.attribute_code, locale, channel)),
                    None => prefixes.push(format!("{}-{}", self.attribute_code, locale)),
                }
            }
        } else {
            match channel {
                Some(channel) => prefixes.push(format!("{}-{}", self.attribute_code, channel)),
                None => prefixes.push(self.attribute_code.clone()),
            }
        }

        match self.attribute_type {
            AttributeType::PriceCollection => prefixes
                .iter()
                .flat_map(|prefix| {
                    self.currencies
                        .iter()
                        .map(move |currency| format!("{}-{}", prefix, currency))
                })
                .collect(),
            AttributeType::Metric => prefixes
                .into_iter()
                .flat_map(|prefix| {
                    let unit = format!("{}-unit", prefix);
                    [prefix, unit]
                })
                .collect(),
            _ => prefixes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::AttributeGroup;

    fn group() -> AttributeGroup {
        AttributeGroup::new("marketing", "Marketing")
    }

    fn locales() -> Vec<String> {
        vec!["en_US".to_string(), "fr_FR".to_string()]
    }

    #[test]
    fn simple_attribute_has_one_column() {
        let attribute = Attribute::new("size", AttributeType::SimpleSelect, group());
        let header = FlatHeader::from_attribute(&attribute, "ecommerce", &locales());

        assert_eq!(header.generate_header_strings(), vec!["size"]);
    }

    #[test]
    fn localizable_scopable_attribute_expands_per_locale() {
        let attribute = Attribute::new("name", AttributeType::Text, group())
            .localizable()
            .scopable();
        let header = FlatHeader::from_attribute(&attribute, "ecommerce", &locales());

        assert_eq!(
            header.generate_header_strings(),
            vec!["name-en_US-ecommerce", "name-fr_FR-ecommerce"]
        );
    }

    #[test]
    fn scopable_only_attribute_uses_channel_suffix() {
        let attribute = Attribute::new("teaser", AttributeType::Text, group()).scopable();
        let header = FlatHeader::from_attribute(&attribute, "mobile", &locales());

        assert_eq!(header.generate_header_strings(), vec!["teaser-mobile"]);
    }

    #[test]
    fn price_collection_expands_per_currency() {
        let attribute = Attribute::new("price", AttributeType::PriceCollection, group())
            .with_currencies(vec!["EUR".into(), "USD".into()]);
        let header = FlatHeader::from_attribute(&attribute, "ecommerce", &locales());

        assert_eq!(header.generate_header_strings(), vec!["price-EUR", "price-USD"]);
    }

    #[test]
    fn metric_adds_unit_column() {
        let attribute = Attribute::new("weight", AttributeType::Metric, group());
        let header = FlatHeader::from_attribute(&attribute, "ecommerce", &locales());

        assert_eq!(header.generate_header_strings(), vec!["weight", "weight-unit"]);
    }

    #[test]
    fn other_types_get_a_plain_column() {
        let attribute = Attribute::new(
            "assets",
            AttributeType::Other("pim_catalog_asset_collection".into()),
            group(),
        );
        let header = FlatHeader::from_attribute(&attribute, "ecommerce", &locales());

        assert!(!header.is_media());
        assert_eq!(header.generate_header_strings(), vec!["assets"]);
    }

    #[test]
    fn image_headers_report_media() {
        let attribute = Attribute::new("packshot", AttributeType::Image, group());
        let header = FlatHeader::from_attribute(&attribute, "ecommerce", &locales());

        assert!(header.is_media());
    }
}
