//! Proportional preview resizing with JPEG output.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;
use std::path::Path;

use crate::config::{ResizeConfig, MAX_RESIZE_TARGET};
use crate::error::PipelineError;

/// Target dimensions for one resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeSpec {
    pub source_width: u32,
    pub source_height: u32,
    pub ratio: f64,
    pub width: u32,
    pub height: u32,
}

impl ResizeSpec {
    /// Scale `width x height` so the longest edge becomes `target`.
    ///
    /// Scaled sizes are truncated toward zero and never drop below 1 pixel.
    /// Small images are scaled up by the same rule.
    pub fn new(width: u32, height: u32, target: u32) -> Self {
        let longest = width.max(height).max(1);
        let ratio = f64::from(target) / f64::from(longest);
        let scale = |side: u32| ((f64::from(side) * ratio) as u32).max(1);
        Self {
            source_width: width,
            source_height: height,
            ratio,
            width: scale(width),
            height: scale(height),
        }
    }
}

/// Produces the resized preview.
pub struct ImageResizer {
    target: u32,
    filter: FilterType,
    quality: u8,
}

impl ImageResizer {
    /// Create a resizer from config.
    ///
    /// An unknown filter name falls back to Catmull-Rom and the target is
    /// clamped to `1..=MAX_RESIZE_TARGET`; `Config::validate` rejects both
    /// before they get here.
    pub fn new(config: &ResizeConfig) -> Self {
        Self {
            target: config.target.clamp(1, MAX_RESIZE_TARGET),
            filter: config.filter_type().unwrap_or(FilterType::CatmullRom),
            quality: config.jpeg_quality.clamp(1, 100),
        }
    }

    /// Dimensions an image of this size will be resized to.
    pub fn spec_for(&self, width: u32, height: u32) -> ResizeSpec {
        ResizeSpec::new(width, height, self.target)
    }

    /// Resize to exactly the computed target dimensions.
    pub fn resize(&self, image: &DynamicImage) -> (DynamicImage, ResizeSpec) {
        let spec = self.spec_for(image.width(), image.height());
        let resized = image.resize_exact(spec.width, spec.height, self.filter);
        (resized, spec)
    }

    /// Encode as baseline JPEG.
    pub fn encode_jpeg(
        &self,
        image: &DynamicImage,
        path: &Path,
    ) -> Result<Vec<u8>, PipelineError> {
        let mut buffer = Vec::new();
        {
            let mut encoder = JpegEncoder::new_with_quality(&mut buffer, self.quality);
            let encoded = match image {
                DynamicImage::ImageLuma8(gray) => encoder.encode_image(gray),
                other => encoder.encode_image(&other.to_rgb8()),
            };
            encoded.map_err(|e| PipelineError::Encode {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        }
        Ok(buffer)
    }
}
