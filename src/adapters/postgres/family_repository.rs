//! PostgreSQL implementation of FamilyRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::catalog::Family;
use crate::ports::{FamilyRepository, RepositoryError};

pub struct PostgresFamilyRepository {
    pool: PgPool,
}

impl PostgresFamilyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FamilyRepository for PostgresFamilyRepository {
    async fn find_by_codes(&self, codes: &[String]) -> Result<Vec<Family>, RepositoryError> {
        if codes.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<(String, Option<Vec<String>>)> = sqlx::query_as(
            r#"
            SELECT f.code,
                   array_agg(a.code ORDER BY a.sort_order, a.code)
                       FILTER (WHERE a.code IS NOT NULL)
            FROM pim_catalog_family f
            LEFT JOIN pim_catalog_family_attribute fa ON fa.family_id = f.id
            LEFT JOIN pim_catalog_attribute a ON a.id = fa.attribute_id
            WHERE f.code = ANY($1)
            GROUP BY f.code
            "#,
        )
        .bind(codes)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::database(format!("Failed to load families: {}", e)))?;

        let mut families: Vec<Family> = rows
            .into_iter()
            .map(|(code, attributes)| Family::new(code, attributes.unwrap_or_default()))
            .collect();

        families.sort_by_key(|f| codes.iter().position(|c| *c == f.code));
        Ok(families)
    }
}
