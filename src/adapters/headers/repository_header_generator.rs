//! Header generation backed by the catalog repositories.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::export::FlatHeader;
use crate::ports::{AttributeRepository, FamilyRepository, HeaderGenerator, RepositoryError};

/// Builds flat headers from attribute definitions.
///
/// Family headers list the families' attribute codes in family order, each
/// code once.
#[derive(Clone)]
pub struct RepositoryHeaderGenerator {
    attributes: Arc<dyn AttributeRepository>,
    families: Arc<dyn FamilyRepository>,
}

impl RepositoryHeaderGenerator {
    pub fn new(attributes: Arc<dyn AttributeRepository>, families: Arc<dyn FamilyRepository>) -> Self {
        Self {
            attributes,
            families,
        }
    }
}

#[async_trait]
impl HeaderGenerator for RepositoryHeaderGenerator {
    async fn from_attribute_codes(
        &self,
        attribute_codes: &[String],
        channel_code: &str,
        locale_codes: &[String],
    ) -> Result<Vec<FlatHeader>, RepositoryError> {
        let attributes = self.attributes.find_by_codes(attribute_codes).await?;

        Ok(attributes
            .iter()
            .map(|attribute| FlatHeader::from_attribute(attribute, channel_code, locale_codes))
            .collect())
    }

    async fn from_family_codes(
        &self,
        family_codes: &[String],
        channel_code: &str,
        locale_codes: &[String],
    ) -> Result<Vec<FlatHeader>, RepositoryError> {
        let families = self.families.find_by_codes(family_codes).await?;

        let mut attribute_codes: Vec<String> = Vec::new();
        for family in &families {
            for code in &family.attribute_codes {
                if !attribute_codes.contains(code) {
                    attribute_codes.push(code.clone());
                }
            }
        }

        self.from_attribute_codes(&attribute_codes, channel_code, locale_codes)
            .await
    }
}
