//! exifview Core - the upload-processing pipeline.
//!
//! Takes an uploaded photograph, stores it under a random name, reads its
//! EXIF tags and replaces it with a resized preview.
//!
//! # Architecture
//!
//! ```text
//! Upload → Check extension → Store raw bytes → Decode → Extract EXIF → Resize → Encode
//! ```
//!
//! HTTP handling and page rendering live in the `exifview` binary.
//!
//! # Usage
//!
//! ```rust,ignore
//! use exifview_core::{Config, UploadPipeline, UploadRequest};
//!
//! let config = Config::load()?;
//! let pipeline = UploadPipeline::new(&config);
//!
//! let upload = UploadRequest::new("holiday.jpg", std::fs::read("holiday.jpg")?);
//! let result = pipeline.process(&upload)?;
//! for (name, value) in result.metadata_lines() {
//!     println!("{name}: {value}");
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod pipeline;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ConfigError, ExifViewError, PipelineError, PipelineResult, Result};
pub use pipeline::{FormatCheck, FormatValidator, MetadataExtractor, ResizeSpec, UploadPipeline};
pub use types::{
    ExifEntry, ExifValue, MetadataReport, ProcessedUpload, StoredImage, UploadRequest,
    UploadStage, UploadStatus, NO_METADATA,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
