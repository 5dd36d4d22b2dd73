//! In-Memory Catalog Adapter
//!
//! Holds attribute and family definitions in memory.
//! Useful for testing and for exports fed from files rather than a database.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::catalog::{Attribute, Family};
use crate::ports::{
    AttributeRepository, AttributeVisibilityReader, FamilyRepository, RepositoryError,
};

/// In-memory attribute and family definitions
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    attributes: Arc<RwLock<Vec<Attribute>>>,
    families: Arc<RwLock<Vec<Family>>>,
}

impl InMemoryCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style attribute registration, for setup before sharing.
    pub fn with_attribute(self, attribute: Attribute) -> Self {
        if let Ok(mut attributes) = self.attributes.try_write() {
            attributes.retain(|a| a.code != attribute.code);
            attributes.push(attribute);
        }
        self
    }

    /// Builder-style family registration, for setup before sharing.
    pub fn with_family(self, family: Family) -> Self {
        if let Ok(mut families) = self.families.try_write() {
            families.retain(|f| f.code != family.code);
            families.push(family);
        }
        self
    }

    /// Add or replace an attribute definition
    pub async fn save_attribute(&self, attribute: Attribute) {
        let mut attributes = self.attributes.write().await;
        attributes.retain(|a| a.code != attribute.code);
        attributes.push(attribute);
    }

    /// Add or replace a family definition
    pub async fn save_family(&self, family: Family) {
        let mut families = self.families.write().await;
        families.retain(|f| f.code != family.code);
        families.push(family);
    }

    /// Get one attribute definition
    pub async fn attribute(&self, code: &str) -> Option<Attribute> {
        self.attributes
            .read()
            .await
            .iter()
            .find(|a| a.code == code)
            .cloned()
    }

    /// Get the number of stored attributes
    pub async fn attribute_count(&self) -> usize {
        self.attributes.read().await.len()
    }

    /// Load definitions from a JSON document `{"attributes": [...], "families": [...]}`.
    pub fn from_json(json: &str) -> Result<Self, RepositoryError> {
        #[derive(serde::Deserialize)]
        struct Snapshot {
            #[serde(default)]
            attributes: Vec<Attribute>,
            #[serde(default)]
            families: Vec<Family>,
        }

        let snapshot: Snapshot =
            serde_json::from_str(json).map_err(|e| RepositoryError::corrupt(e.to_string()))?;

        Ok(Self {
            attributes: Arc::new(RwLock::new(snapshot.attributes)),
            families: Arc::new(RwLock::new(snapshot.families)),
        })
    }
}

#[async_trait]
impl AttributeRepository for InMemoryCatalog {
    async fn find_by_code(&self, code: &str) -> Result<Option<Attribute>, RepositoryError> {
        Ok(self.attribute(code).await)
    }

    async fn find_by_codes(&self, codes: &[String]) -> Result<Vec<Attribute>, RepositoryError> {
        let attributes = self.attributes.read().await;
        Ok(codes
            .iter()
            .filter_map(|code| attributes.iter().find(|a| &a.code == code).cloned())
            .collect())
    }
}

#[async_trait]
impl FamilyRepository for InMemoryCatalog {
    async fn find_by_codes(&self, codes: &[String]) -> Result<Vec<Family>, RepositoryError> {
        let families = self.families.read().await;
        Ok(codes
            .iter()
            .filter_map(|code| families.iter().find(|f| &f.code == code).cloned())
            .collect())
    }
}

#[async_trait]
impl AttributeVisibilityReader for InMemoryCatalog {
    async fn not_public_attribute_codes(&self) -> Result<Vec<String>, RepositoryError> {
        let attributes = self.attributes.read().await;
        Ok(attributes
            .iter()
            .filter(|a| a.group.is_not_public())
            .map(|a| a.code.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{AttributeGroup, AttributeType};

    fn attribute(code: &str, group: &str) -> Attribute {
        Attribute::new(code, AttributeType::Text, AttributeGroup::new(group, group))
    }

    #[tokio::test]
    async fn find_by_codes_follows_requested_order_and_skips_unknown() {
        let catalog = InMemoryCatalog::new()
            .with_attribute(attribute("name", "marketing"))
            .with_attribute(attribute("size", "technical"));

        let found = AttributeRepository::find_by_codes(
            &catalog,
            &["size".to_string(), "ghost".to_string(), "name".to_string()],
        )
        .await
        .unwrap();

        let codes: Vec<&str> = found.iter().map(|a| a.code.as_str()).collect();
        assert_eq!(codes, vec!["size", "name"]);
    }

    #[tokio::test]
    async fn save_replaces_existing_definition() {
        let catalog = InMemoryCatalog::new();
        catalog.save_attribute(attribute("name", "marketing")).await;
        catalog.save_attribute(attribute("name", "notpublic")).await;

        assert_eq!(catalog.attribute_count().await, 1);
        assert_eq!(
            catalog.not_public_attribute_codes().await.unwrap(),
            vec!["name"]
        );
    }

    #[tokio::test]
    async fn unknown_code_is_none() {
        let catalog = InMemoryCatalog::new();
        assert!(catalog.find_by_code("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn loads_snapshot_from_json() {
        let catalog = InMemoryCatalog::from_json(
            r#"{
                "attributes": [
                    {"code": "color", "type": "pim_catalog_simpleselect",
                     "group": {"code": "notpublic", "label": "Internal"}}
                ],
                "families": [{"code": "shoes", "attribute_codes": ["color"]}]
            }"#,
        )
        .unwrap();

        assert!(catalog.find_by_code("color").await.unwrap().is_some());
        let families = FamilyRepository::find_by_codes(&catalog, &["shoes".to_string()])
            .await
            .unwrap();
        assert_eq!(families[0].attribute_codes, vec!["color"]);
    }

    #[tokio::test]
    async fn snapshot_accepts_types_without_special_handling() {
        let catalog = InMemoryCatalog::from_json(
            r#"{
                "attributes": [
                    {"code": "assets", "type": "pim_catalog_asset_collection",
                     "group": {"code": "media", "label": "Media"}},
                    {"code": "brand", "type": "pim_reference_data_simpleselect",
                     "group": {"code": "marketing", "label": "Marketing"}},
                    {"code": "sizes", "type": "pim_catalog_table",
                     "group": {"code": "technical", "label": "Technical"}}
                ]
            }"#,
        )
        .unwrap();

        let assets = catalog.find_by_code("assets").await.unwrap().unwrap();
        assert_eq!(assets.attribute_type.as_str(), "pim_catalog_asset_collection");
        assert_eq!(
            AttributeRepository::find_by_codes(&catalog, &["brand".to_string(), "sizes".to_string()])
                .await
                .unwrap()
                .len(),
            2
        );
    }

    #[test]
    fn malformed_snapshot_is_corrupt() {
        assert!(matches!(
            InMemoryCatalog::from_json("{"),
            Err(RepositoryError::Corrupt(_))
        ));
    }
}
