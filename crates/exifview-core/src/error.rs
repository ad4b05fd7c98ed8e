//! Error types for the exifview upload pipeline.
//!
//! Errors are organized by stage so every failed upload can be reported with
//! the stored path (when one exists) and the reason it stopped.

use std::path::PathBuf;
use thiserror::Error;

use crate::types::UploadStatus;

/// Top-level error type for exifview operations.
#[derive(Error, Debug)]
pub enum ExifViewError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Upload pipeline errors, organized by stage.
///
/// Everything after the format check leaves the raw upload on disk.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Extension is not one of the accepted JPEG extensions; nothing was written
    #[error("Invalid image format for {filename:?}")]
    InvalidFormat { filename: String },

    /// Stored bytes could not be decoded as a JPEG image
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// Resized image could not be encoded
    #[error("Encode error for {path}: {message}")]
    Encode { path: PathBuf, message: String },

    /// Reading or writing the working directory failed
    #[error("IO error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    /// Status signal handed to the response renderer.
    pub fn status(&self) -> UploadStatus {
        match self {
            Self::InvalidFormat { .. } => UploadStatus::Rejected,
            Self::Decode { .. } | Self::Encode { .. } => UploadStatus::DecodeFailed,
            Self::Io { .. } => UploadStatus::IoFailed,
        }
    }

    /// Message safe to show to the uploader.
    ///
    /// Internal paths and OS error text stay in the logs.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidFormat { .. } => "Invalid image",
            Self::Decode { .. } | Self::Encode { .. } => "Could not read the uploaded image",
            Self::Io { .. } => "Could not store the uploaded image",
        }
    }

    /// Path of the raw file left behind by a failed upload, if any.
    pub fn orphaned_path(&self) -> Option<&PathBuf> {
        match self {
            Self::InvalidFormat { .. } => None,
            Self::Decode { path, .. } | Self::Encode { path, .. } => Some(path),
            // The write itself may be what failed.
            Self::Io { path, .. } => path.exists().then_some(path),
        }
    }
}

/// Convenience type alias for exifview results.
pub type Result<T> = std::result::Result<T, ExifViewError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
