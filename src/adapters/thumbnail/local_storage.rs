//! Filesystem media loader and rendition cache.
//!
//! Source media live under `media_dir/<key>`; renditions under
//! `cache_dir/<filter>/<key>`.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::ports::{Binary, MediaLoader, ThumbnailCache, ThumbnailError};

/// Joins a storage key under `root`, refusing keys that escape it.
fn resolve(root: &Path, key: &str) -> Option<PathBuf> {
    let relative = Path::new(key);
    let safe = relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    (safe && !key.is_empty()).then(|| root.join(relative))
}

fn mime_type_of(path: &Path) -> Option<String> {
    image::ImageFormat::from_path(path)
        .ok()
        .map(|format| format.to_mime_type().to_string())
}

#[derive(Debug, Clone)]
pub struct LocalMediaLoader {
    media_dir: PathBuf,
}

impl LocalMediaLoader {
    pub fn new(media_dir: impl Into<PathBuf>) -> Self {
        Self {
            media_dir: media_dir.into(),
        }
    }
}

#[async_trait]
impl MediaLoader for LocalMediaLoader {
    async fn find(&self, _filter: &str, path: &str) -> Result<Binary, ThumbnailError> {
        let file = resolve(&self.media_dir, path).ok_or_else(|| ThumbnailError::not_loadable(path))?;
        let content = fs::read(&file)
            .await
            .map_err(|_| ThumbnailError::not_loadable(path))?;
        Ok(Binary::new(content, mime_type_of(&file)))
    }
}

#[derive(Debug, Clone)]
pub struct LocalThumbnailCache {
    cache_dir: PathBuf,
}

impl LocalThumbnailCache {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// Location of the rendition of `path` for `filter`. A key escaping the
    /// cache directory is not loadable.
    pub fn rendition_path(&self, path: &str, filter: &str) -> Result<PathBuf, ThumbnailError> {
        let filter_dir = resolve(&self.cache_dir, filter)
            .ok_or_else(|| ThumbnailError::UnknownFilter(filter.to_string()))?;
        resolve(&filter_dir, path).ok_or_else(|| ThumbnailError::not_loadable(path))
    }
}

#[async_trait]
impl ThumbnailCache for LocalThumbnailCache {
    fn url(&self, path: &str, filter: &str) -> Result<String, ThumbnailError> {
        let target = std::path::absolute(self.rendition_path(path, filter)?)
            .map_err(|e| ThumbnailError::Storage(e.to_string()))?;
        Ok(format!("file://{}", target.display()))
    }

    async fn is_stored(&self, path: &str, filter: &str) -> Result<bool, ThumbnailError> {
        let target = self.rendition_path(path, filter)?;
        fs::try_exists(&target)
            .await
            .map_err(|e| ThumbnailError::Storage(e.to_string()))
    }

    async fn store(&self, binary: Binary, path: &str, filter: &str) -> Result<(), ThumbnailError> {
        let target = self.rendition_path(path, filter)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ThumbnailError::Storage(e.to_string()))?;
        }
        fs::write(&target, binary.content)
            .await
            .map_err(|e| ThumbnailError::Storage(format!("{}: {}", target.display(), e)))
    }
}
