//! Catalog Repository Ports - Read access to attributes, families and groups.
//!
//! The publishing outputs never create or change attributes; they only look
//! definitions up by code. An unknown code is `Ok(None)`, never an error.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::catalog::{Attribute, Family};
use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors raised by catalog repositories.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    /// The backing store failed.
    #[error("Database error: {0}")]
    Database(String),

    /// A stored row could not be mapped to the domain model.
    #[error("Corrupt catalog data: {0}")]
    Corrupt(String),
}

impl RepositoryError {
    pub fn database(reason: impl Into<String>) -> Self {
        Self::Database(reason.into())
    }

    pub fn corrupt(reason: impl Into<String>) -> Self {
        Self::Corrupt(reason.into())
    }
}

impl From<RepositoryError> for DomainError {
    fn from(err: RepositoryError) -> Self {
        DomainError::new(ErrorCode::DatabaseError, err.to_string())
    }
}

/// Port for looking up attribute definitions.
#[async_trait]
pub trait AttributeRepository: Send + Sync {
    /// Finds one attribute by code.
    async fn find_by_code(&self, code: &str) -> Result<Option<Attribute>, RepositoryError>;

    /// Finds several attributes, in the order of `codes`. Unknown codes are
    /// skipped.
    async fn find_by_codes(&self, codes: &[String]) -> Result<Vec<Attribute>, RepositoryError>;
}

/// Port for looking up family definitions.
#[async_trait]
pub trait FamilyRepository: Send + Sync {
    /// Finds several families, in the order of `codes`. Unknown codes are
    /// skipped.
    async fn find_by_codes(&self, codes: &[String]) -> Result<Vec<Family>, RepositoryError>;
}

/// Port answering which attributes belong to the `notpublic` group.
///
/// The answer is independent of any actor role.
#[async_trait]
pub trait AttributeVisibilityReader: Send + Sync {
    async fn not_public_attribute_codes(&self) -> Result<Vec<String>, RepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_error_maps_to_database_domain_error() {
        let err: DomainError = RepositoryError::database("connection refused").into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(err.message.contains("connection refused"));
    }

    #[test]
    fn catalog_ports_are_object_safe() {
        fn check<T: ?Sized>() {}
        check::<dyn AttributeRepository>();
        check::<dyn FamilyRepository>();
        check::<dyn AttributeVisibilityReader>();
    }
}
