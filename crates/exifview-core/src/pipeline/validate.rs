//! Upload format validation.
//!
//! The decision is made on the file name alone. The signature sniff is only a
//! diagnostic: content problems surface later as decode errors.

/// Extensions accepted for upload, lowercase with leading dot.
pub const ALLOWED_EXTENSIONS: &[&str] = &[".jpg", ".jpeg"];

/// Result of checking an upload's file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatCheck {
    /// Extension is allowed; carries the normalized extension (e.g. `.jpg`)
    Accepted(String),
    Rejected,
}

/// Accepts or rejects uploads by extension.
pub struct FormatValidator;

impl FormatValidator {
    /// Check the original file name against the allowed extensions.
    ///
    /// Only the final extension of the final path component counts, compared
    /// case-insensitively.
    pub fn check(original_filename: &str) -> FormatCheck {
        match Self::extension(original_filename) {
            Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => FormatCheck::Accepted(ext),
            _ => FormatCheck::Rejected,
        }
    }

    /// Lowercased final extension with its leading dot.
    ///
    /// A leading dot alone (`.jpg`) marks a hidden file, not an extension.
    pub fn extension(filename: &str) -> Option<String> {
        let base = filename.rsplit(&['/', '\\'][..]).next().unwrap_or(filename);
        let stem_end = base.trim_start_matches('.').len();
        let base = &base[base.len() - stem_end..];
        let dot = base.rfind('.')?;
        Some(base[dot..].to_lowercase())
    }

    /// Whether the bytes start with a JPEG start-of-image marker.
    pub fn sniff_jpeg(bytes: &[u8]) -> bool {
        // JPEG: FF D8 FF
        bytes.len() >= 3 && bytes[0] == 0xFF && bytes[1] == 0xD8 && bytes[2] == 0xFF
    }
}
