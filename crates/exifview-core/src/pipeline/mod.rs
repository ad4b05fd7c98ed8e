//! Upload processing pipeline components.
//!
//! - **validate**: Accept or reject uploads by extension
//! - **naming**: Random names for stored uploads
//! - **store**: Writes into the working directory
//! - **decode**: Decode stored bytes as JPEG
//! - **metadata**: Extract EXIF tags
//! - **exif_tags**: Static tag-ID to name tables
//! - **resize**: Proportional preview resize and JPEG encode
//! - **processor**: Orchestrates the full pipeline

pub mod decode;
pub mod exif_tags;
pub mod metadata;
pub mod naming;
pub mod processor;
pub mod resize;
pub mod store;
pub mod validate;

// Re-exports for convenient access
pub use decode::{DecodedImage, ImageDecoder};
pub use metadata::MetadataExtractor;
pub use naming::NameGenerator;
pub use processor::UploadPipeline;
pub use resize::{ImageResizer, ResizeSpec};
pub use validate::{FormatCheck, FormatValidator, ALLOWED_EXTENSIONS};
