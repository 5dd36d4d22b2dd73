//! PostgreSQL implementation of AttributeRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::catalog::{Attribute, AttributeGroup, AttributeType};
use crate::ports::{AttributeRepository, RepositoryError};

/// Attribute definitions read from the PIM catalog tables.
///
/// Group labels come from the group translations in `label_locale`, falling
/// back to the group code. Price collections carry the activated currencies.
pub struct PostgresAttributeRepository {
    pool: PgPool,
    label_locale: String,
}

/// Row of the attribute definition query.
#[derive(Debug, sqlx::FromRow)]
struct AttributeRow {
    code: String,
    attribute_type: String,
    is_localizable: bool,
    is_scopable: bool,
    group_code: String,
    group_label: String,
}

impl AttributeRow {
    fn into_attribute(self, currencies: &[String]) -> Attribute {
        let attribute_type = AttributeType::from(self.attribute_type);
        let is_price_collection = attribute_type == AttributeType::PriceCollection;

        let mut attribute = Attribute::new(
            self.code,
            attribute_type,
            AttributeGroup::new(self.group_code, self.group_label),
        );
        attribute.localizable = self.is_localizable;
        attribute.scopable = self.is_scopable;
        if is_price_collection {
            attribute.currencies = currencies.to_vec();
        }
        attribute
    }
}

const SELECT_ATTRIBUTES: &str = r#"
    SELECT a.code,
           a.attribute_type,
           a.is_localizable,
           a.is_scopable,
           ag.code AS group_code,
           COALESCE(agt.label, ag.code) AS group_label
    FROM pim_catalog_attribute a
    INNER JOIN pim_catalog_attribute_group ag ON ag.id = a.group_id
    LEFT JOIN pim_catalog_attribute_group_translation agt
           ON agt.foreign_key = ag.id AND agt.locale = $2
    WHERE a.code = ANY($1)
"#;

impl PostgresAttributeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            label_locale: "en_US".to_string(),
        }
    }

    /// Sets the locale of the group labels.
    pub fn with_label_locale(mut self, locale: impl Into<String>) -> Self {
        self.label_locale = locale.into();
        self
    }

    async fn activated_currencies(&self) -> Result<Vec<String>, RepositoryError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT code
            FROM pim_catalog_currency
            WHERE is_activated = TRUE
            ORDER BY code
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::database(format!("Failed to load currencies: {}", e)))?;

        Ok(rows.into_iter().map(|(code,)| code).collect())
    }
}

#[async_trait]
impl AttributeRepository for PostgresAttributeRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<Attribute>, RepositoryError> {
        let mut found = self.find_by_codes(&[code.to_string()]).await?;
        Ok(found.pop())
    }

    async fn find_by_codes(&self, codes: &[String]) -> Result<Vec<Attribute>, RepositoryError> {
        if codes.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<AttributeRow> = sqlx::query_as(SELECT_ATTRIBUTES)
            .bind(codes)
            .bind(&self.label_locale)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to load attributes: {}", e)))?;

        let currencies = if rows
            .iter()
            .any(|row| row.attribute_type == AttributeType::PriceCollection.as_str())
        {
            self.activated_currencies().await?
        } else {
            Vec::new()
        };

        let mut attributes: Vec<Attribute> = rows
            .into_iter()
            .map(|row| row.into_attribute(&currencies))
            .collect();

        // Caller order, not table order.
        attributes.sort_by_key(|a| codes.iter().position(|c| *c == a.code));
        Ok(attributes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(code: &str, attribute_type: &str) -> AttributeRow {
        AttributeRow {
            code: code.to_string(),
            attribute_type: attribute_type.to_string(),
            is_localizable: true,
            is_scopable: false,
            group_code: "media".to_string(),
            group_label: "Media".to_string(),
        }
    }

    #[test]
    fn maps_known_types_and_currencies() {
        let currencies = vec!["EUR".to_string()];

        let price = row("price", "pim_catalog_price_collection").into_attribute(&currencies);
        let name = row("name", "pim_catalog_text").into_attribute(&currencies);

        assert_eq!(price.attribute_type, AttributeType::PriceCollection);
        assert_eq!(price.currencies, currencies);
        assert!(name.currencies.is_empty());
        assert!(name.localizable);
        assert_eq!(name.group, AttributeGroup::new("media", "Media"));
    }

    #[test]
    fn unknown_type_is_kept_instead_of_failing() {
        let assets = row("assets", "pim_catalog_asset_collection").into_attribute(&[]);

        assert_eq!(
            assets.attribute_type,
            AttributeType::Other("pim_catalog_asset_collection".to_string())
        );
        assert!(!assets.is_image());
    }
}
