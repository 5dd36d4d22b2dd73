//! Application layer - Use cases orchestrating the domain and the ports.
//!
//! - `AttributeVisibilityFilter` - Which attributes an output may show
//! - `ExportRowAssembler` / `CsvProductWriter` - Product CSV export
//! - `ThumbnailWarmer` / `ProductPdfRenderer` - Product PDF sheet

mod csv_product_writer;
mod export_row_assembler;
mod product_pdf_renderer;
mod thumbnail_warmer;
mod visibility_filter;

pub use csv_product_writer::{CsvProductWriter, ExportSummary};
pub use export_row_assembler::{
    strip_hidden_values, strip_values_in, ExportError, ExportRowAssembler,
};
pub use product_pdf_renderer::{ProductPdfRenderer, RenderError};
pub use thumbnail_warmer::{RenditionLink, ThumbnailWarmer, WarmReport};
pub use visibility_filter::AttributeVisibilityFilter;
