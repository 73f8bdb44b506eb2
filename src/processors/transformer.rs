// pixconv/src/processors/transformer.rs
//! The image transformation seam.
//!
//! The engine hands raw source bytes to a [`Transformer`] and writes back
//! whatever encoded bytes it returns. [`ImageTransformer`] is the real
//! implementation built on the `image` crate; tests substitute a recorder.

use super::{Compressor, Loader, ResizeAlgorithm, Resizer};
use crate::core::Result;
use image::ImageFormat;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformRequest {
    /// Target width; `None` keeps the native width.
    pub width: Option<u32>,
    pub allow_enlarge: bool,
    pub format: ImageFormat,
}

pub trait Transformer: Sync {
    /// Decode `source`, resize per `request`, and encode to `request.format`.
    fn transform(&self, source: &[u8], request: &TransformRequest) -> Result<Vec<u8>>;
}

pub struct ImageTransformer {
    loader: Loader,
    compressor: Compressor,
    algorithm: ResizeAlgorithm,
}

impl ImageTransformer {
    pub fn new(quality: u8, optimize_png: bool) -> Self {
        Self {
            loader: Loader::new(),
            compressor: Compressor::new(quality).with_png_optimization(optimize_png),
            algorithm: ResizeAlgorithm::Lanczos3,
        }
    }

    pub fn with_algorithm(mut self, algorithm: ResizeAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }
}

impl Default for ImageTransformer {
    fn default() -> Self {
        Self::new(80, true)
    }
}

impl Transformer for ImageTransformer {
    fn transform(&self, source: &[u8], request: &TransformRequest) -> Result<Vec<u8>> {
        let mut image = self.loader.load_from_bytes(source)?;

        if let Some(width) = request.width {
            image = Resizer::new(self.algorithm, request.allow_enlarge).resize_to_width(image, width);
        }

        let encoded = self.compressor.compress_to_bytes(&image, request.format)?;

        log::debug!(
            "Transformed {} bytes into {} bytes ({:.1}% smaller)",
            source.len(),
            encoded.len(),
            self.compressor
                .calculate_savings(source.len() as u64, encoded.len() as u64)
        );

        Ok(encoded)
    }
}
