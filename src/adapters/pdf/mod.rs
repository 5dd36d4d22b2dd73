//! PDF adapters - `PdfBuilder` implementations.

mod command_pdf_builder;

pub use command_pdf_builder::CommandPdfBuilder;
