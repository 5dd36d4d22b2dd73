//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the publishing use cases to external systems:
//! - `postgres` - Catalog ports over the PIM database
//! - `memory` - Catalog and thumbnail ports kept in memory
//! - `headers` - Flat file header generation
//! - `csv` - CSV file output
//! - `template` - MiniJinja templating
//! - `pdf` - External HTML-to-PDF converter
//! - `thumbnail` - Filesystem media, rendition cache, resize filter
//! - `actor` - Fixed actor context

pub mod actor;
pub mod csv;
pub mod headers;
pub mod memory;
pub mod pdf;
pub mod postgres;
pub mod template;
pub mod thumbnail;

pub use actor::StaticActorContext;
pub use csv::CsvFileWriter;
pub use headers::RepositoryHeaderGenerator;
pub use memory::{InMemoryCatalog, InMemoryMediaLoader, InMemoryThumbnailCache};
pub use pdf::CommandPdfBuilder;
pub use postgres::{
    PostgresAttributeRepository, PostgresAttributeVisibilityReader, PostgresFamilyRepository,
};
pub use template::{MiniJinjaTemplateRenderer, PRODUCT_SHEET_TEMPLATE};
pub use thumbnail::{LocalMediaLoader, LocalThumbnailCache, ResizeImageFilter};
