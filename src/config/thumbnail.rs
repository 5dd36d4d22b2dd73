//! Thumbnail configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::domain::pdf::THUMBNAIL_FILTER;

#[derive(Debug, Clone, Deserialize)]
pub struct ThumbnailConfig {
    /// Filter applied to product sheet images
    #[serde(default = "default_filter")]
    pub filter: String,

    #[serde(default = "default_size")]
    pub width: u32,

    #[serde(default = "default_size")]
    pub height: u32,

    /// Root of the source media storage
    #[serde(default = "default_media_dir")]
    pub media_dir: PathBuf,

    /// Root of the rendition cache
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
}

impl ThumbnailConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.filter.is_empty() {
            return Err(ValidationError::MissingRequired("THUMBNAILS_FILTER"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(ValidationError::InvalidThumbnailSize);
        }
        Ok(())
    }
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            width: default_size(),
            height: default_size(),
            media_dir: default_media_dir(),
            cache_dir: default_cache_dir(),
        }
    }
}

fn default_filter() -> String {
    THUMBNAIL_FILTER.to_string()
}

fn default_size() -> u32 {
    360
}

fn default_media_dir() -> PathBuf {
    PathBuf::from("var/file_storage/catalog")
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("var/cache/media")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_the_sheet_filter() {
        let config = ThumbnailConfig::default();
        assert_eq!(config.filter, "pdf_thumbnail_large");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_width_is_rejected() {
        let config = ThumbnailConfig {
            width: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidThumbnailSize));
    }
}
