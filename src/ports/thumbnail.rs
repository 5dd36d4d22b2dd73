//! Thumbnail Ports - Source media loading, image filters and the rendition
//! cache used by the product sheet.
//!
//! A rendition is identified by `(path, filter)`: the media storage key and
//! the name of the filter that produced it.

use async_trait::async_trait;
use thiserror::Error;

/// Raw image content passed between loader, filter and cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binary {
    pub content: Vec<u8>,
    pub mime_type: Option<String>,
}

impl Binary {
    pub fn new(content: Vec<u8>, mime_type: Option<String>) -> Self {
        Self { content, mime_type }
    }
}

/// Errors raised by the thumbnail ports.
#[derive(Debug, Clone, Error)]
pub enum ThumbnailError {
    /// The source media does not exist or cannot be read. Callers warming a
    /// cache treat this as "skip this image".
    #[error("Source image not loadable: {0}")]
    NotLoadable(String),

    #[error("Unknown thumbnail filter: {0}")]
    UnknownFilter(String),

    #[error("Image filter failed: {0}")]
    FilterFailed(String),

    #[error("Thumbnail storage failed: {0}")]
    Storage(String),
}

impl ThumbnailError {
    pub fn not_loadable(path: impl Into<String>) -> Self {
        Self::NotLoadable(path.into())
    }

    pub fn is_not_loadable(&self) -> bool {
        matches!(self, ThumbnailError::NotLoadable(_))
    }
}

/// Port for loading source media.
#[async_trait]
pub trait MediaLoader: Send + Sync {
    async fn find(&self, filter: &str, path: &str) -> Result<Binary, ThumbnailError>;
}

/// Port applying a named filter (resize, crop, ...) to an image.
#[async_trait]
pub trait ImageFilter: Send + Sync {
    async fn apply(&self, binary: Binary, filter: &str) -> Result<Binary, ThumbnailError>;
}

/// Port for the rendition cache.
///
/// A key the cache cannot address is reported as `NotLoadable`, like a
/// missing source.
#[async_trait]
pub trait ThumbnailCache: Send + Sync {
    /// Absolute URL of the rendition, usable by the PDF converter whatever
    /// its working directory.
    fn url(&self, path: &str, filter: &str) -> Result<String, ThumbnailError>;

    async fn is_stored(&self, path: &str, filter: &str) -> Result<bool, ThumbnailError>;

    async fn store(&self, binary: Binary, path: &str, filter: &str) -> Result<(), ThumbnailError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_not_loadable_is_flagged() {
        assert!(ThumbnailError::not_loadable("img1.jpg").is_not_loadable());
        assert!(!ThumbnailError::Storage("disk full".into()).is_not_loadable());
    }

    #[test]
    fn thumbnail_ports_are_object_safe() {
        fn check<T: ?Sized>() {}
        check::<dyn MediaLoader>();
        check::<dyn ImageFilter>();
        check::<dyn ThumbnailCache>();
    }
}
