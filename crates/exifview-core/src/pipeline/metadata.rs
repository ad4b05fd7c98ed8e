//! EXIF metadata extraction from uploaded images.

use exif::{Context, Field, In, Reader, Value};
use std::collections::BTreeMap;
use std::io::Cursor;

use super::exif_tags::{gps_tag_name, tag_name, GPS_INFO_TAG};
use crate::types::{ExifEntry, ExifValue, MetadataReport};

/// Extracts EXIF tags from image bytes.
pub struct MetadataExtractor;

impl MetadataExtractor {
    /// Extract the primary image's EXIF tags.
    ///
    /// Never fails: a missing or unparseable EXIF segment gives an empty
    /// report. Tags without a known name are dropped.
    pub fn extract(bytes: &[u8]) -> MetadataReport {
        let exif = match Reader::new().read_from_container(&mut Cursor::new(bytes)) {
            Ok(exif) => exif,
            Err(e) => {
                tracing::debug!("No usable EXIF segment: {}", e);
                return MetadataReport::empty();
            }
        };

        let mut entries: BTreeMap<u16, ExifEntry> = BTreeMap::new();
        let mut gps: BTreeMap<u16, String> = BTreeMap::new();

        for field in exif.fields().filter(|f| f.ifd_num == In::PRIMARY) {
            let id = field.tag.number();
            match field.tag.context() {
                Context::Tiff | Context::Exif => {
                    let Some(name) = tag_name(id) else {
                        continue;
                    };
                    if let Some(value) = Self::convert(&field.value) {
                        entries
                            .entry(id)
                            .or_insert_with(|| ExifEntry::new(id, name, value));
                    }
                }
                Context::Gps => {
                    if let Some(rendered) = Self::render_gps(field) {
                        gps.entry(id).or_insert(rendered);
                    }
                }
                _ => {}
            }
        }

        if !gps.is_empty() {
            let folded = gps.into_values().collect::<Vec<_>>().join("; ");
            entries.insert(
                GPS_INFO_TAG,
                ExifEntry::new(GPS_INFO_TAG, "GPSInfo", ExifValue::Text(folded)),
            );
        }

        MetadataReport::from_entries(entries.into_values().collect())
    }

    /// `Name=value` for a known GPS field.
    fn render_gps(field: &Field) -> Option<String> {
        let name = gps_tag_name(field.tag.number())?;
        let value = Self::convert(&field.value)?;
        Some(format!("{}={}", name, value))
    }

    /// Map an on-disk EXIF value to its display family.
    fn convert(value: &Value) -> Option<ExifValue> {
        let converted = match value {
            Value::Byte(v) => ExifValue::Integer(v.iter().map(|&x| i64::from(x)).collect()),
            Value::Undefined(v, _) => ExifValue::Bytes(v.clone()),
            Value::Ascii(strings) => ExifValue::Text(
                strings
                    .iter()
                    .map(|s| {
                        let end = s.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
                        String::from_utf8_lossy(&s[..end]).into_owned()
                    })
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            Value::Short(v) => ExifValue::Integer(v.iter().map(|&x| i64::from(x)).collect()),
            Value::Long(v) => ExifValue::Integer(v.iter().map(|&x| i64::from(x)).collect()),
            Value::SByte(v) => ExifValue::Integer(v.iter().map(|&x| i64::from(x)).collect()),
            Value::SShort(v) => ExifValue::Integer(v.iter().map(|&x| i64::from(x)).collect()),
            Value::SLong(v) => ExifValue::Integer(v.iter().map(|&x| i64::from(x)).collect()),
            Value::Rational(v) => ExifValue::Rational(
                v.iter()
                    .map(|r| (i64::from(r.num), i64::from(r.denom)))
                    .collect(),
            ),
            Value::SRational(v) => ExifValue::Rational(
                v.iter()
                    .map(|r| (i64::from(r.num), i64::from(r.denom)))
                    .collect(),
            ),
            Value::Float(v) => ExifValue::Float(v.iter().map(|&x| f64::from(x)).collect()),
            Value::Double(v) => ExifValue::Float(v.clone()),
            _ => return None,
        };
        Some(converted)
    }
}
