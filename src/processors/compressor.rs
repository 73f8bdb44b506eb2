// pixconv/src/processors/compressor.rs
use crate::core::{ConvertError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, ImageFormat};
use oxipng::{optimize_from_memory, Options};
use std::io::Cursor;

/// Encodes decoded images into the requested output format.
#[derive(Debug, Clone)]
pub struct Compressor {
    quality: u8,
    optimize_png: bool,
}

impl Compressor {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
            optimize_png: true,
        }
    }

    pub fn with_png_optimization(mut self, optimize: bool) -> Self {
        self.optimize_png = optimize;
        self
    }

    pub fn compress_to_bytes(&self, image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>> {
        log::debug!(
            "Encoding {}x{} image as {:?}, quality: {}",
            image.width(),
            image.height(),
            format,
            self.quality
        );

        let mut buffer = Cursor::new(Vec::new());

        match format {
            ImageFormat::Jpeg => {
                // JPEG has no alpha channel.
                let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
                let encoder = JpegEncoder::new_with_quality(&mut buffer, self.quality);
                rgb.write_with_encoder(encoder)?;
            }
            ImageFormat::WebP => {
                let prepared = if image.color().has_alpha() {
                    DynamicImage::ImageRgba8(image.to_rgba8())
                } else {
                    DynamicImage::ImageRgb8(image.to_rgb8())
                };
                let encoder = WebPEncoder::new_lossless(&mut buffer);
                prepared.write_with_encoder(encoder)?;
            }
            ImageFormat::Png => {
                image.write_to(&mut buffer, ImageFormat::Png)?;
                if self.optimize_png {
                    return self.optimize_png_bytes(&buffer.into_inner());
                }
            }
            _ => {
                image.write_to(&mut buffer, format)?;
            }
        }

        Ok(buffer.into_inner())
    }

    fn optimize_png_bytes(&self, data: &[u8]) -> Result<Vec<u8>> {
        optimize_from_memory(data, &Options::default())
            .map_err(|e| ConvertError::ProcessingError(format!("PNG optimization failed: {}", e)))
    }

    pub fn calculate_savings(&self, original_size: u64, compressed_size: u64) -> f64 {
        if original_size == 0 {
            return 0.0;
        }

        let savings = (original_size as f64 - compressed_size as f64) / original_size as f64 * 100.0;
        savings.max(0.0)
    }
}

impl Default for Compressor {
    fn default() -> Self {
        Self::new(80)
    }
}
