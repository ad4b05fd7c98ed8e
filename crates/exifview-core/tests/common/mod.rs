//! JPEG fixtures with hand-built EXIF segments.

#![allow(dead_code)]

use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};

/// A TIFF field value for fixture IFDs.
#[derive(Clone)]
pub enum Field {
    Ascii(&'static str),
    Byte(Vec<u8>),
    Short(u16),
    Long(u32),
    Rational(u32, u32),
    Undefined(Vec<u8>),
}

impl Field {
    /// (type, count, payload)
    fn encode(&self) -> (u16, u32, Vec<u8>) {
        match self {
            Field::Ascii(s) => {
                let mut bytes = s.as_bytes().to_vec();
                bytes.push(0);
                (2, bytes.len() as u32, bytes)
            }
            Field::Byte(bytes) => (1, bytes.len() as u32, bytes.clone()),
            Field::Short(v) => (3, 1, v.to_le_bytes().to_vec()),
            Field::Long(v) => (4, 1, v.to_le_bytes().to_vec()),
            Field::Rational(n, d) => {
                let mut bytes = n.to_le_bytes().to_vec();
                bytes.extend(d.to_le_bytes());
                (5, 1, bytes)
            }
            Field::Undefined(bytes) => (7, bytes.len() as u32, bytes.clone()),
        }
    }
}

/// Serialize one IFD that starts at `start` within the TIFF block.
fn ifd(entries: &[(u16, Field)], start: u32) -> Vec<u8> {
    let data_start = start + 2 + 12 * entries.len() as u32 + 4;
    let mut head = Vec::new();
    let mut data = Vec::new();

    head.extend((entries.len() as u16).to_le_bytes());
    for (tag, field) in entries {
        let (ty, count, payload) = field.encode();
        head.extend(tag.to_le_bytes());
        head.extend(ty.to_le_bytes());
        head.extend(count.to_le_bytes());
        if payload.len() <= 4 {
            let mut inline = [0u8; 4];
            inline[..payload.len()].copy_from_slice(&payload);
            head.extend(inline);
        } else {
            let offset = data_start + data.len() as u32;
            head.extend(offset.to_le_bytes());
            data.extend(&payload);
            if data.len() % 2 == 1 {
                data.push(0);
            }
        }
    }
    head.extend(0u32.to_le_bytes());
    head.extend(data);
    head
}

/// Little-endian TIFF block with IFD0 and an optional GPS IFD.
pub fn tiff(ifd0: &[(u16, Field)], gps: Option<&[(u16, Field)]>) -> Vec<u8> {
    tiff_with_sub_ifds(ifd0, None, gps)
}

/// Little-endian TIFF block with IFD0 and optional Exif and GPS sub-IFDs.
///
/// Sub-IFDs follow IFD0 in that order, linked through the 0x8769 and 0x8825
/// pointer tags.
pub fn tiff_with_sub_ifds(
    ifd0: &[(u16, Field)],
    exif: Option<&[(u16, Field)]>,
    gps: Option<&[(u16, Field)]>,
) -> Vec<u8> {
    let mut entries = ifd0.to_vec();
    if exif.is_some() {
        entries.push((0x8769, Field::Long(0)));
    }
    if gps.is_some() {
        entries.push((0x8825, Field::Long(0)));
    }
    entries.sort_by_key(|(tag, _)| *tag);

    let ifd0_len = ifd(&entries, 8).len() as u32;
    let exif_offset = 8 + ifd0_len;
    let exif_len = exif.map_or(0, |e| ifd(e, exif_offset).len() as u32);
    let gps_offset = exif_offset + exif_len;
    for entry in entries.iter_mut() {
        match entry.0 {
            0x8769 => entry.1 = Field::Long(exif_offset),
            0x8825 => entry.1 = Field::Long(gps_offset),
            _ => {}
        }
    }

    let mut out = b"II".to_vec();
    out.extend(42u16.to_le_bytes());
    out.extend(8u32.to_le_bytes());
    out.extend(ifd(&entries, 8));
    if let Some(exif) = exif {
        out.extend(ifd(exif, exif_offset));
    }
    if let Some(gps) = gps {
        out.extend(ifd(gps, gps_offset));
    }
    out
}

/// Plain baseline JPEG with a gradient.
pub fn jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, 90)
        .encode_image(&img)
        .unwrap();
    out
}

/// Insert an APP1 Exif segment right after the SOI marker.
pub fn with_exif(jpeg: &[u8], tiff: &[u8]) -> Vec<u8> {
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
    let mut payload = b"Exif\0\0".to_vec();
    payload.extend(tiff);

    let mut out = vec![0xFF, 0xD8, 0xFF, 0xE1];
    out.extend(((payload.len() + 2) as u16).to_be_bytes());
    out.extend(payload);
    out.extend(&jpeg[2..]);
    out
}

/// JPEG carrying `Make`, `Model` and `Orientation` tags.
pub fn camera_jpeg(width: u32, height: u32) -> Vec<u8> {
    let exif = tiff(
        &[
            (0x010f, Field::Ascii("TestCam")),
            (0x0110, Field::Ascii("Model One")),
            (0x0112, Field::Short(1)),
        ],
        None,
    );
    with_exif(&jpeg(width, height), &exif)
}

/// Whether `name` is 16 `[a-z0-9]` characters plus `.jpg` or `.jpeg`.
pub fn is_generated_name(name: &str) -> bool {
    let stem = match name
        .strip_suffix(".jpg")
        .or_else(|| name.strip_suffix(".jpeg"))
    {
        Some(stem) => stem,
        None => return false,
    };
    stem.len() == 16
        && stem
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
}
