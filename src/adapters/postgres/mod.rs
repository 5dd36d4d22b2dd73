//! PostgreSQL adapters - Catalog ports backed by the PIM database.
//!
//! - `PostgresAttributeRepository` - Attribute definitions with group labels
//! - `PostgresFamilyRepository` - Family attribute lists
//! - `PostgresAttributeVisibilityReader` - Codes of the `notpublic` group

mod attribute_repository;
mod family_repository;
mod visibility_reader;

pub use attribute_repository::PostgresAttributeRepository;
pub use family_repository::PostgresFamilyRepository;
pub use visibility_reader::PostgresAttributeVisibilityReader;
