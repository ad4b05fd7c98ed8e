//! Image decoding with format detection.

use image::{DynamicImage, GenericImageView, ImageFormat};
use std::io::Cursor;
use std::path::Path;

use crate::error::PipelineError;

/// Decodes stored uploads.
pub struct ImageDecoder;

/// Result of decoding an image.
pub struct DecodedImage {
    /// The decoded image data
    pub image: DynamicImage,
    /// Detected image format
    pub format: ImageFormat,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageDecoder {
    /// Decode JPEG bytes that were stored at `path`.
    ///
    /// The format is detected from content, not from the name. Anything that
    /// is not a decodable JPEG is a decode error.
    pub fn decode_bytes(bytes: &[u8], path: &Path) -> Result<DecodedImage, PipelineError> {
        let reader = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| PipelineError::Decode {
                path: path.to_path_buf(),
                message: format!("Cannot detect image format: {}", e),
            })?;

        let format = match reader.format() {
            Some(ImageFormat::Jpeg) => ImageFormat::Jpeg,
            Some(other) => {
                return Err(PipelineError::Decode {
                    path: path.to_path_buf(),
                    message: format!("Expected JPEG, found {}", format_to_string(other)),
                })
            }
            None => {
                return Err(PipelineError::Decode {
                    path: path.to_path_buf(),
                    message: "Unrecognized image format".to_string(),
                })
            }
        };

        let image = reader.decode().map_err(|e| PipelineError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(PipelineError::Decode {
                path: path.to_path_buf(),
                message: format!("Image has no pixels ({}x{})", width, height),
            });
        }

        Ok(DecodedImage {
            image,
            format,
            width,
            height,
        })
    }
}

/// Convert an ImageFormat to a string representation.
pub fn format_to_string(format: ImageFormat) -> String {
    match format {
        ImageFormat::Jpeg => "jpeg".to_string(),
        ImageFormat::Png => "png".to_string(),
        ImageFormat::WebP => "webp".to_string(),
        ImageFormat::Gif => "gif".to_string(),
        ImageFormat::Tiff => "tiff".to_string(),
        ImageFormat::Bmp => "bmp".to_string(),
        _ => "unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::jpeg::JpegEncoder;

    fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::from_pixel(width, height, image::Rgb([200, 40, 40]));
        let mut out = Vec::new();
        JpegEncoder::new_with_quality(&mut out, 85)
            .encode_image(&img)
            .unwrap();
        out
    }

    #[test]
    fn test_format_to_string() {
        assert_eq!(format_to_string(ImageFormat::Jpeg), "jpeg");
        assert_eq!(format_to_string(ImageFormat::Png), "png");
    }

    #[test]
    fn test_decode_jpeg() {
        let bytes = jpeg_bytes(40, 30);
        let decoded = ImageDecoder::decode_bytes(&bytes, Path::new("temp/a.jpg")).unwrap();
        assert_eq!(decoded.format, ImageFormat::Jpeg);
        assert_eq!((decoded.width, decoded.height), (40, 30));
    }

    #[test]
    fn test_text_file_is_decode_error() {
        let err = ImageDecoder::decode_bytes(b"just some notes\n", Path::new("temp/a.jpg"))
            .err()
            .unwrap();
        match err {
            PipelineError::Decode { path, .. } => assert_eq!(path, Path::new("temp/a.jpg")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_truncated_jpeg_is_decode_error() {
        let bytes = jpeg_bytes(64, 64);
        let result = ImageDecoder::decode_bytes(&bytes[..40], Path::new("temp/a.jpg"));
        assert!(matches!(result, Err(PipelineError::Decode { .. })));
    }
}
