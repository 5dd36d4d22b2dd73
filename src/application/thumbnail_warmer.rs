//! Pre-generates the thumbnail renditions a product sheet references.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::ports::{ImageFilter, MediaLoader, ThumbnailCache, ThumbnailError};

/// Where the PDF converter finds the rendition of one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenditionLink {
    pub path: String,
    pub url: String,
}

/// Outcome of warming one batch of image paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WarmReport {
    pub generated: Vec<String>,
    pub already_cached: Vec<String>,
    pub not_loadable: Vec<String>,
}

#[derive(Clone)]
pub struct ThumbnailWarmer {
    loader: Arc<dyn MediaLoader>,
    filter: Arc<dyn ImageFilter>,
    cache: Arc<dyn ThumbnailCache>,
}

impl ThumbnailWarmer {
    pub fn new(
        loader: Arc<dyn MediaLoader>,
        filter: Arc<dyn ImageFilter>,
        cache: Arc<dyn ThumbnailCache>,
    ) -> Self {
        Self {
            loader,
            filter,
            cache,
        }
    }

    /// Rendition URLs of `image_paths` for `filter`, in order. Paths the
    /// cache cannot address are left out.
    pub fn rendition_links(
        &self,
        image_paths: &[String],
        filter: &str,
    ) -> Result<Vec<RenditionLink>, ThumbnailError> {
        let mut links = Vec::with_capacity(image_paths.len());
        for path in image_paths {
            match self.cache.url(path, filter) {
                Ok(url) => links.push(RenditionLink {
                    path: path.clone(),
                    url,
                }),
                Err(err) if err.is_not_loadable() => {
                    debug!(path = %path, filter, "No rendition location: {}", err);
                }
                Err(err) => return Err(err),
            }
        }
        Ok(links)
    }

    /// Ensures a rendition of every path exists for `filter`.
    ///
    /// A source that cannot be loaded is skipped; any other failure aborts.
    /// Two concurrent warmers may both regenerate the same rendition.
    pub async fn generate_thumbnails_cache(
        &self,
        image_paths: &[String],
        filter: &str,
    ) -> Result<WarmReport, ThumbnailError> {
        let mut report = WarmReport::default();

        for path in image_paths {
            match self.warm(path, filter).await {
                Ok(true) => report.generated.push(path.clone()),
                Ok(false) => report.already_cached.push(path.clone()),
                Err(err) if err.is_not_loadable() => {
                    debug!(path = %path, filter, "Skipping thumbnail: {}", err);
                    report.not_loadable.push(path.clone());
                }
                Err(err) => return Err(err),
            }
        }

        info!(
            generated = report.generated.len(),
            cached = report.already_cached.len(),
            skipped = report.not_loadable.len(),
            filter,
            "Thumbnail cache warmed"
        );
        Ok(report)
    }

    /// Returns whether a rendition had to be generated.
    async fn warm(&self, path: &str, filter: &str) -> Result<bool, ThumbnailError> {
        if self.cache.is_stored(path, filter).await? {
            return Ok(false);
        }

        let binary = self.loader.find(filter, path).await?;
        let rendition = self.filter.apply(binary, filter).await?;
        self.cache.store(rendition, path, filter).await?;
        Ok(true)
    }
}
