// pixconv/src/processors/resizer.rs
use image::{imageops::FilterType, DynamicImage, GenericImageView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeAlgorithm {
    Nearest,
    Bilinear,
    Lanczos3,
}

/// Width-driven resizing; height always follows the aspect ratio.
#[derive(Debug, Clone)]
pub struct Resizer {
    algorithm: ResizeAlgorithm,
    allow_enlarge: bool,
}

impl Resizer {
    pub fn new(algorithm: ResizeAlgorithm, allow_enlarge: bool) -> Self {
        Self {
            algorithm,
            allow_enlarge,
        }
    }

    pub fn resize_to_width(&self, image: DynamicImage, width: u32) -> DynamicImage {
        let (orig_width, orig_height) = image.dimensions();
        let (new_width, new_height) = self.calculate_dimensions(orig_width, orig_height, width);

        if new_width == orig_width && new_height == orig_height {
            log::debug!("Image dimensions unchanged, skipping resize");
            return image;
        }

        log::debug!(
            "Resizing image from {}x{} to {}x{}",
            orig_width,
            orig_height,
            new_width,
            new_height
        );

        image.resize_exact(new_width, new_height, self.get_filter_type())
    }

    pub fn calculate_dimensions(&self, orig_width: u32, orig_height: u32, width: u32) -> (u32, u32) {
        if width == 0 || width == orig_width || orig_width == 0 {
            return (orig_width, orig_height);
        }

        if width > orig_width && !self.allow_enlarge {
            return (orig_width, orig_height);
        }

        let ratio = width as f64 / orig_width as f64;
        let height = (orig_height as f64 * ratio).round() as u32;
        (width, height.max(1))
    }

    fn get_filter_type(&self) -> FilterType {
        match self.algorithm {
            ResizeAlgorithm::Nearest => FilterType::Nearest,
            ResizeAlgorithm::Bilinear => FilterType::Triangle,
            ResizeAlgorithm::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl Default for Resizer {
    fn default() -> Self {
        Self::new(ResizeAlgorithm::Lanczos3, false)
    }
}
