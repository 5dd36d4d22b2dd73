//! PostgreSQL implementation of AttributeVisibilityReader.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::ports::{AttributeVisibilityReader, RepositoryError};

/// Reads the codes of the attributes in the `notpublic` group.
pub struct PostgresAttributeVisibilityReader {
    pool: PgPool,
}

impl PostgresAttributeVisibilityReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttributeVisibilityReader for PostgresAttributeVisibilityReader {
    async fn not_public_attribute_codes(&self) -> Result<Vec<String>, RepositoryError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT a.code
            FROM pim_catalog_attribute a
            INNER JOIN pim_catalog_attribute_group ag ON ag.id = a.group_id
            WHERE ag.code = 'notpublic'
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            RepositoryError::database(format!("Failed to load notpublic attributes: {}", e))
        })?;

        debug!(count = rows.len(), "Loaded notpublic attribute codes");
        Ok(rows.into_iter().map(|(code,)| code).collect())
    }
}
