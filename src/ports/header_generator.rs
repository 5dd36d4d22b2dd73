//! Header Generator Port - Column definitions for flat file exports.

use async_trait::async_trait;

use crate::domain::export::FlatHeader;

use super::RepositoryError;

/// Port producing flat file headers from attribute or family codes.
///
/// # Contract
///
/// - Headers follow the order of the given codes.
/// - Unknown attribute or family codes produce no header.
/// - Family-derived headers list each attribute once, even when shared by
///   several families.
#[async_trait]
pub trait HeaderGenerator: Send + Sync {
    async fn from_attribute_codes(
        &self,
        attribute_codes: &[String],
        channel_code: &str,
        locale_codes: &[String],
    ) -> Result<Vec<FlatHeader>, RepositoryError>;

    async fn from_family_codes(
        &self,
        family_codes: &[String],
        channel_code: &str,
        locale_codes: &[String],
    ) -> Result<Vec<FlatHeader>, RepositoryError>;
}
