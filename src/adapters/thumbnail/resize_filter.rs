//! Image filter resizing to named bounding boxes.

use std::collections::HashMap;
use std::io::Cursor;

use async_trait::async_trait;
use image::{ImageFormat, ImageReader};

use crate::domain::pdf::THUMBNAIL_FILTER;
use crate::ports::{Binary, ImageFilter, ThumbnailError};

/// Bounding box of a named filter, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSize {
    pub width: u32,
    pub height: u32,
}

/// Scales images down to fit the filter's box, keeping the aspect ratio.
/// Output is PNG.
#[derive(Debug, Clone)]
pub struct ResizeImageFilter {
    filters: HashMap<String, FilterSize>,
}

impl Default for ResizeImageFilter {
    fn default() -> Self {
        Self::new().with_filter(THUMBNAIL_FILTER, 360, 360)
    }
}

impl ResizeImageFilter {
    pub fn new() -> Self {
        Self {
            filters: HashMap::new(),
        }
    }

    pub fn with_filter(mut self, name: impl Into<String>, width: u32, height: u32) -> Self {
        self.filters.insert(name.into(), FilterSize { width, height });
        self
    }

    fn resize(binary: &Binary, size: FilterSize) -> Result<Binary, ThumbnailError> {
        let source = ImageReader::new(Cursor::new(&binary.content))
            .with_guessed_format()
            .map_err(|e| ThumbnailError::FilterFailed(e.to_string()))?
            .decode()
            .map_err(|e| ThumbnailError::FilterFailed(e.to_string()))?;

        let thumbnail = source.thumbnail(size.width, size.height);

        let mut out = Cursor::new(Vec::new());
        thumbnail
            .write_to(&mut out, ImageFormat::Png)
            .map_err(|e| ThumbnailError::FilterFailed(e.to_string()))?;

        Ok(Binary::new(
            out.into_inner(),
            Some(ImageFormat::Png.to_mime_type().to_string()),
        ))
    }
}

#[async_trait]
impl ImageFilter for ResizeImageFilter {
    async fn apply(&self, binary: Binary, filter: &str) -> Result<Binary, ThumbnailError> {
        let size = *self
            .filters
            .get(filter)
            .ok_or_else(|| ThumbnailError::UnknownFilter(filter.to_string()))?;

        tokio::task::spawn_blocking(move || Self::resize(&binary, size))
            .await
            .map_err(|e| ThumbnailError::FilterFailed(e.to_string()))?
    }
}
