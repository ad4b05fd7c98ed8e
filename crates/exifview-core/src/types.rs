//! Core data types for the exifview upload pipeline.
//!
//! These types describe what goes into the pipeline (an upload), what it
//! leaves on disk, and what it hands back to the page renderer.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Text shown in place of the metadata list when an image carries no EXIF.
pub const NO_METADATA: &str = "No EXIF found";

/// An uploaded file as received from the HTTP layer.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Client-supplied file name. Untrusted: only its extension is used.
    pub original_filename: String,

    /// Raw upload body
    pub body: Vec<u8>,
}

impl UploadRequest {
    pub fn new(original_filename: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            original_filename: original_filename.into(),
            body: body.into(),
        }
    }
}

/// An upload persisted under a generated name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredImage {
    /// Generated file name: 16 characters of `[a-z0-9]` plus the extension
    pub name: String,

    /// Location inside the working directory
    pub path: PathBuf,
}

/// A decoded EXIF value, grouped by the family of its on-disk type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ExifValue {
    /// SHORT, LONG and the signed integer types
    Integer(Vec<i64>),
    /// RATIONAL / SRATIONAL as (numerator, denominator)
    Rational(Vec<(i64, i64)>),
    /// FLOAT / DOUBLE
    Float(Vec<f64>),
    /// ASCII strings, already joined
    Text(String),
    /// BYTE and UNDEFINED payloads
    Bytes(Vec<u8>),
}

impl fmt::Display for ExifValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(values) => write_list(f, values, |f, v| write!(f, "{v}")),
            Self::Rational(values) => write_list(f, values, |f, (num, den)| {
                write!(f, "{num}/{den}")
            }),
            Self::Float(values) => write_list(f, values, |f, v| write!(f, "{v}")),
            Self::Text(text) => f.write_str(text),
            Self::Bytes(bytes) => f.write_str(&render_bytes(bytes)),
        }
    }
}

/// Single values render bare, several as a parenthesised list.
fn write_list<T>(
    f: &mut fmt::Formatter<'_>,
    values: &[T],
    mut item: impl FnMut(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
) -> fmt::Result {
    match values {
        [] => Ok(()),
        [single] => item(f, single),
        many => {
            f.write_str("(")?;
            for (i, value) in many.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                item(f, value)?;
            }
            f.write_str(")")
        }
    }
}

/// Render a byte payload for display.
///
/// Printable text (trailing NULs dropped) is shown as is. Anything else has
/// every byte outside printable ASCII written as `\xNN`, NULs included.
pub fn render_bytes(bytes: &[u8]) -> String {
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    let trimmed = &bytes[..end];
    match std::str::from_utf8(trimmed) {
        Ok(text) if !text.is_empty() && !text.chars().any(char::is_control) => {
            text.to_string()
        }
        _ => {
            let mut out = String::with_capacity(bytes.len() * 4);
            for &b in bytes {
                if b == b' ' || b.is_ascii_graphic() {
                    out.push(char::from(b));
                } else {
                    out.push_str(&format!("\\x{b:02x}"));
                }
            }
            out
        }
    }
}

/// One resolved EXIF tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExifEntry {
    /// Numeric tag ID
    pub tag_id: u16,

    /// Human-readable tag name
    pub name: &'static str,

    /// Typed value
    pub value: ExifValue,

    /// Value as shown on the page
    pub display: String,
}

impl ExifEntry {
    pub fn new(tag_id: u16, name: &'static str, value: ExifValue) -> Self {
        let display = value.to_string();
        Self {
            tag_id,
            name,
            value,
            display,
        }
    }
}

/// EXIF tags of one image, in ascending tag-ID order.
///
/// An empty report means the image had no readable EXIF segment.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MetadataReport {
    entries: Vec<ExifEntry>,
}

impl MetadataReport {
    /// The "no metadata" report.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a report, sorting entries by tag ID.
    pub fn from_entries(mut entries: Vec<ExifEntry>) -> Self {
        entries.sort_by_key(|e| e.tag_id);
        Self { entries }
    }

    pub fn entries(&self) -> &[ExifEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Look up a rendered value by tag name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.display.as_str())
    }

    /// `(name, rendered value)` pairs in ascending tag-ID order.
    pub fn lines(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|e| (e.name.to_string(), e.display.clone()))
            .collect()
    }
}

/// The result of a successful upload, consumed by the page renderer.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedUpload {
    /// Generated file name
    pub stored_name: String,

    /// Path of the resized image
    pub stored_path: PathBuf,

    /// EXIF tags read from the original upload
    pub metadata: MetadataReport,

    /// Preview width in pixels
    pub width: u32,

    /// Preview height in pixels
    pub height: u32,

    /// Width of the uploaded image
    pub original_width: u32,

    /// Height of the uploaded image
    pub original_height: u32,
}

impl ProcessedUpload {
    /// `(name, value)` pairs for the metadata list.
    pub fn metadata_lines(&self) -> Vec<(String, String)> {
        self.metadata.lines()
    }

    /// Serialize for machine-readable output.
    pub fn to_json(&self, pretty: bool) -> crate::error::Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

/// Outcome signal for the response renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadStatus {
    Success,
    /// Extension not accepted; nothing written
    Rejected,
    /// Stored bytes were not a decodable JPEG; raw file left on disk
    DecodeFailed,
    /// Working directory could not be read or written
    IoFailed,
}

/// Stages of the upload state machine, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum UploadStage {
    Received,
    FormatChecked,
    Stored,
    Decoded,
    MetadataExtracted,
    Resized,
    Encoded,
}

impl fmt::Display for UploadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Received => "received",
            Self::FormatChecked => "format_checked",
            Self::Stored => "stored",
            Self::Decoded => "decoded",
            Self::MetadataExtracted => "metadata_extracted",
            Self::Resized => "resized",
            Self::Encoded => "encoded",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_rendering() {
        assert_eq!(ExifValue::Integer(vec![1]).to_string(), "1");
        assert_eq!(ExifValue::Integer(vec![2, 2, 1]).to_string(), "(2, 2, 1)");
        assert_eq!(ExifValue::Integer(vec![]).to_string(), "");
    }

    #[test]
    fn test_rational_rendering() {
        assert_eq!(ExifValue::Rational(vec![(72, 1)]).to_string(), "72/1");
        assert_eq!(
            ExifValue::Rational(vec![(1, 1), (30, 1)]).to_string(),
            "(1/1, 30/1)"
        );
    }

    #[test]
    fn test_bytes_rendering_text() {
        assert_eq!(render_bytes(b"0230"), "0230");
        assert_eq!(render_bytes(b"ASCII\0\0\0"), "ASCII");
    }

    #[test]
    fn test_bytes_rendering_binary_is_escaped() {
        assert_eq!(
            render_bytes(&[0x01, 0x02, 0x03, 0x00]),
            "\\x01\\x02\\x03\\x00"
        );
        assert_eq!(render_bytes(&[0xff, b'a']), "\\xffa");
    }

    #[test]
    fn test_bytes_rendering_keeps_nul_only_payloads() {
        assert_eq!(render_bytes(&[0]), "\\x00");
        assert_eq!(render_bytes(&[0, 0]), "\\x00\\x00");
        assert_eq!(render_bytes(&[]), "");
    }

    #[test]
    fn test_bytes_rendering_uses_hex_escapes_only() {
        assert_eq!(render_bytes(b"it's\n\xff"), "it's\\x0a\\xff");
        assert_eq!(render_bytes(b"a\"b\t"), "a\"b\\x09");
    }

    #[test]
    fn test_report_sorted_by_tag_id() {
        let report = MetadataReport::from_entries(vec![
            ExifEntry::new(0x0110, "Model", ExifValue::Text("X100".into())),
            ExifEntry::new(0x010f, "Make", ExifValue::Text("TestCam".into())),
        ]);
        let lines = report.lines();
        assert_eq!(lines[0], ("Make".to_string(), "TestCam".to_string()));
        assert_eq!(lines[1], ("Model".to_string(), "X100".to_string()));
        assert_eq!(report.get("Model"), Some("X100"));
    }

    #[test]
    fn test_processed_upload_json() {
        let upload = ProcessedUpload {
            stored_name: "abcdefghij012345.jpg".into(),
            stored_path: PathBuf::from("temp/abcdefghij012345.jpg"),
            metadata: MetadataReport::from_entries(vec![ExifEntry::new(
                0x0112,
                "Orientation",
                ExifValue::Integer(vec![1]),
            )]),
            width: 350,
            height: 175,
            original_width: 700,
            original_height: 350,
        };
        let json: serde_json::Value = serde_json::from_str(&upload.to_json(false).unwrap()).unwrap();
        assert_eq!(json["width"], 350);
        assert_eq!(json["metadata"][0]["name"], "Orientation");
        assert_eq!(json["metadata"][0]["display"], "1");
        assert_eq!(json["metadata"][0]["value"]["type"], "integer");
    }

    #[test]
    fn test_stage_order() {
        assert!(UploadStage::Received < UploadStage::FormatChecked);
        assert!(UploadStage::Resized < UploadStage::Encoded);
        assert_eq!(UploadStage::MetadataExtracted.to_string(), "metadata_extracted");
    }
}
