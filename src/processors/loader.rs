// pixconv/src/processors/loader.rs
use crate::core::{ConvertError, Result};
use image::{DynamicImage, GenericImageView, ImageError, ImageReader, Limits};
use std::io::Cursor;

#[derive(Debug, Clone)]
pub struct Loader {
    max_dimensions: Option<(u32, u32)>,
}

impl Loader {
    pub fn new() -> Self {
        Self {
            max_dimensions: Some((100_000, 100_000)),
        }
    }

    pub fn with_max_dimensions(mut self, width: u32, height: u32) -> Self {
        self.max_dimensions = Some((width, height));
        self
    }

    /// Decodes an in-memory image, guessing its format from the content.
    pub fn load_from_bytes(&self, data: &[u8]) -> Result<DynamicImage> {
        if data.is_empty() {
            return Err(ConvertError::ProcessingError("Image data is empty".to_string()));
        }

        let mut reader = ImageReader::new(Cursor::new(data)).with_guessed_format()?;
        let format = reader.format().ok_or_else(|| {
            ConvertError::UnsupportedFormat("Unrecognized image data".to_string())
        })?;

        // Dimensions are checked against the header before any pixel buffer exists.
        if let Some((max_w, max_h)) = self.max_dimensions {
            let mut limits = Limits::default();
            limits.max_image_width = Some(max_w);
            limits.max_image_height = Some(max_h);
            reader.limits(limits);
        }

        let image = reader.decode().map_err(|e| match e {
            ImageError::Limits(limit) => ConvertError::MemoryLimitExceeded(limit.to_string()),
            other => ConvertError::ProcessingError(format!("Failed to decode image: {}", other)),
        })?;

        let (width, height) = image.dimensions();
        log::debug!(
            "Decoded {:?} image: {}x{} pixels, color: {:?}",
            format,
            width,
            height,
            image.color()
        );

        Ok(image)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
