//! Thumbnail adapters - Filesystem media, rendition cache and the resize
//! filter.

mod local_storage;
mod resize_filter;

pub use local_storage::{LocalMediaLoader, LocalThumbnailCache};
pub use resize_filter::{FilterSize, ResizeImageFilter};
