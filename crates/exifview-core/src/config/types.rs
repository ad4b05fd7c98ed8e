//! Sub-configuration structs with their defaults.

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where uploads are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Working directory for stored and resized uploads
    pub dir: PathBuf,

    /// Draw a new name when the generated one already exists on disk.
    ///
    /// Off by default: a collision overwrites the earlier upload.
    pub regenerate_on_collision: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("temp"),
            regenerate_on_collision: false,
        }
    }
}

/// Largest accepted `resize.target`, well under the JPEG limit of 65535.
pub const MAX_RESIZE_TARGET: u32 = 8192;

/// Preview resize settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeConfig {
    /// Length in pixels the longest edge is scaled to (up or down)
    pub target: u32,

    /// Resampling filter: nearest, triangle, catmullrom, gaussian, lanczos3
    pub filter: String,

    /// JPEG quality for the re-encoded preview (1-100)
    pub jpeg_quality: u8,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            target: 350,
            filter: "catmullrom".to_string(),
            jpeg_quality: 90,
        }
    }
}

impl ResizeConfig {
    /// Resolve the configured filter name.
    pub fn filter_type(&self) -> Option<FilterType> {
        parse_filter(&self.filter)
    }
}

/// Parse a resampling filter name (case-insensitive).
pub fn parse_filter(name: &str) -> Option<FilterType> {
    match name.to_lowercase().as_str() {
        "nearest" => Some(FilterType::Nearest),
        "triangle" | "bilinear" => Some(FilterType::Triangle),
        "catmullrom" | "bicubic" => Some(FilterType::CatmullRom),
        "gaussian" => Some(FilterType::Gaussian),
        "lanczos3" | "lanczos" => Some(FilterType::Lanczos3),
        _ => None,
    }
}

/// Resource limits for incoming uploads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum request body size in megabytes
    pub max_upload_size_mb: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_upload_size_mb: 16,
        }
    }
}

impl LimitsConfig {
    /// Upload limit in bytes.
    pub fn max_upload_bytes(&self) -> usize {
        (self.max_upload_size_mb as usize).saturating_mul(1024 * 1024)
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8000".to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
