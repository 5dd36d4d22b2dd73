//! In-Memory Thumbnail Adapters
//!
//! A media store and a rendition cache kept in memory, for tests and
//! previews.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{Binary, MediaLoader, ThumbnailCache, ThumbnailError};

/// Source media keyed by storage path
#[derive(Debug, Clone, Default)]
pub struct InMemoryMediaLoader {
    media: Arc<RwLock<HashMap<String, Binary>>>,
}

impl InMemoryMediaLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, path: impl Into<String>, binary: Binary) {
        self.media.write().await.insert(path.into(), binary);
    }
}

#[async_trait]
impl MediaLoader for InMemoryMediaLoader {
    async fn find(&self, _filter: &str, path: &str) -> Result<Binary, ThumbnailError> {
        self.media
            .read()
            .await
            .get(path)
            .cloned()
            .ok_or_else(|| ThumbnailError::not_loadable(path))
    }
}

/// Renditions keyed by `(path, filter)`
#[derive(Debug, Clone, Default)]
pub struct InMemoryThumbnailCache {
    renditions: Arc<RwLock<HashMap<(String, String), Binary>>>,
}

impl InMemoryThumbnailCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a stored rendition
    pub async fn get(&self, path: &str, filter: &str) -> Option<Binary> {
        self.renditions
            .read()
            .await
            .get(&(path.to_string(), filter.to_string()))
            .cloned()
    }

    /// Get the number of stored renditions
    pub async fn len(&self) -> usize {
        self.renditions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.renditions.read().await.is_empty()
    }
}

#[async_trait]
impl ThumbnailCache for InMemoryThumbnailCache {
    fn url(&self, path: &str, filter: &str) -> Result<String, ThumbnailError> {
        Ok(format!("memory://{}/{}", filter, path))
    }

    async fn is_stored(&self, path: &str, filter: &str) -> Result<bool, ThumbnailError> {
        Ok(self
            .renditions
            .read()
            .await
            .contains_key(&(path.to_string(), filter.to_string())))
    }

    async fn store(&self, binary: Binary, path: &str, filter: &str) -> Result<(), ThumbnailError> {
        self.renditions
            .write()
            .await
            .insert((path.to_string(), filter.to_string()), binary);
        Ok(())
    }
}
