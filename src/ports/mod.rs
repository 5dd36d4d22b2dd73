//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the publishing logic and the outside world. Adapters implement these ports.
//!
//! ## Catalog Ports
//!
//! - `AttributeRepository` / `FamilyRepository` - Definition lookups
//! - `AttributeVisibilityReader` - Codes of the `notpublic` group
//! - `HeaderGenerator` - Flat file column definitions
//!
//! ## Rendering Ports
//!
//! - `TemplateRenderer` - Templating engine
//! - `PdfBuilder` - Markup to PDF conversion
//! - `MediaLoader` / `ImageFilter` / `ThumbnailCache` - Image renditions
//! - `ActorContext` - Current user
//!
//! ## Output Ports
//!
//! - `FlatFileWriter` - CSV persistence

mod actor_context;
mod catalog_repository;
mod flat_file_writer;
mod header_generator;
mod pdf_builder;
mod template_renderer;
mod thumbnail;

pub use actor_context::ActorContext;
pub use catalog_repository::{
    AttributeRepository, AttributeVisibilityReader, FamilyRepository, RepositoryError,
};
pub use flat_file_writer::{FlatFileError, FlatFileWriter, WriterConfiguration};
pub use header_generator::HeaderGenerator;
pub use pdf_builder::{PdfBuildError, PdfBuilder};
pub use template_renderer::{TemplateError, TemplateRenderer};
pub use thumbnail::{Binary, ImageFilter, MediaLoader, ThumbnailCache, ThumbnailError};
