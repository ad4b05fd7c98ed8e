//! Upload orchestration - wires together all processing stages.
//!
//! Stages run in a fixed order with no way back:
//! `Received → FormatChecked → Stored → Decoded → MetadataExtracted →
//! Resized → Encoded`. The raw upload is written before it is decoded, so a
//! failure after `FormatChecked` leaves that file behind for the caller to
//! treat as an orphan.

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::Config;
use crate::error::{PipelineError, PipelineResult};
use crate::types::{ProcessedUpload, StoredImage, UploadRequest, UploadStage};

use super::decode::{format_to_string, ImageDecoder};
use super::metadata::MetadataExtractor;
use super::naming::NameGenerator;
use super::resize::ImageResizer;
use super::store;
use super::validate::{FormatCheck, FormatValidator};

/// Runs an upload through validation, storage, metadata extraction and
/// resizing.
pub struct UploadPipeline {
    storage_dir: PathBuf,
    names: NameGenerator,
    resizer: ImageResizer,
}

impl UploadPipeline {
    /// Create a pipeline writing into the configured working directory.
    pub fn new(config: &Config) -> Self {
        Self {
            storage_dir: config.storage_dir(),
            names: NameGenerator::new(config.storage.regenerate_on_collision),
            resizer: ImageResizer::new(&config.resize),
        }
    }

    /// Directory uploads are written to.
    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    /// Process a single upload.
    ///
    /// Returns `InvalidFormat` without touching the disk when the extension
    /// is not accepted. Any later error leaves the raw upload in place.
    pub fn process(&self, request: &UploadRequest) -> PipelineResult<ProcessedUpload> {
        let start = Instant::now();
        trace_stage(UploadStage::Received, start);

        let extension = match FormatValidator::check(&request.original_filename) {
            FormatCheck::Accepted(ext) => ext,
            FormatCheck::Rejected => {
                tracing::info!(
                    filename = %request.original_filename,
                    "Rejected upload with unsupported extension"
                );
                return Err(PipelineError::InvalidFormat {
                    filename: request.original_filename.clone(),
                });
            }
        };
        trace_stage(UploadStage::FormatChecked, start);

        let stored = self.store(&request.body, &extension)?;
        trace_stage(UploadStage::Stored, start);

        if !FormatValidator::sniff_jpeg(&request.body) {
            tracing::warn!(
                path = %stored.path.display(),
                "Upload has a JPEG extension but no JPEG signature"
            );
        }

        let decoded = ImageDecoder::decode_bytes(&request.body, &stored.path)?;
        trace_stage(UploadStage::Decoded, start);

        let metadata = MetadataExtractor::extract(&request.body);
        trace_stage(UploadStage::MetadataExtracted, start);

        let (resized, spec) = self.resizer.resize(&decoded.image);
        trace_stage(UploadStage::Resized, start);

        let bytes = self.resizer.encode_jpeg(&resized, &stored.path)?;
        store::write_file(&stored.path, &bytes)?;
        trace_stage(UploadStage::Encoded, start);

        tracing::debug!(
            "Processed {} in {:?} ({} {}x{} -> {}x{}, {} EXIF tags)",
            stored.name,
            start.elapsed(),
            format_to_string(decoded.format),
            decoded.width,
            decoded.height,
            spec.width,
            spec.height,
            metadata.len()
        );

        Ok(ProcessedUpload {
            stored_name: stored.name,
            stored_path: stored.path,
            metadata,
            width: spec.width,
            height: spec.height,
            original_width: decoded.width,
            original_height: decoded.height,
        })
    }

    /// Pick a name and write the raw upload under it.
    fn store(&self, body: &[u8], extension: &str) -> PipelineResult<StoredImage> {
        store::ensure_dir(&self.storage_dir)?;
        let name = self.names.generate(&self.storage_dir, extension);
        let path = self.storage_dir.join(&name);
        store::write_file(&path, body)?;
        Ok(StoredImage { name, path })
    }
}

fn trace_stage(stage: UploadStage, start: Instant) {
    tracing::trace!(%stage, elapsed = ?start.elapsed(), "Upload stage reached");
}
