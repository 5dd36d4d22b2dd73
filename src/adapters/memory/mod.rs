//! In-memory adapters - Catalog and thumbnail ports without infrastructure.

mod catalog;
mod thumbnails;

pub use catalog::InMemoryCatalog;
pub use thumbnails::{InMemoryMediaLoader, InMemoryThumbnailCache};
