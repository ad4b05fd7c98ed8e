//! HTML pages rendered with maud.
//!
//! Every dynamic value goes through maud's escaping, including EXIF text
//! pulled from uploaded files.

use exifview_core::{ProcessedUpload, NO_METADATA};
use maud::{html, Markup, DOCTYPE};

const CSS: &str = "body { font-family: sans-serif; margin: 2rem; } \
                   ul.exif { list-style: none; padding: 0; } \
                   ul.exif li { margin: 0.2rem 0; }";

/// Renders the base HTML document structure
fn layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (CSS) }
            }
            body {
                (content)
            }
        }
    }
}

/// Upload form.
pub fn index() -> Markup {
    layout(
        "EXIF viewer",
        html! {
            h1 { "EXIF viewer" }
            p { "Upload a JPEG to see its EXIF tags and a resized preview." }
            form action="/upload" method="post" enctype="multipart/form-data" {
                input type="file" name="file" accept=".jpg,.jpeg";
                " "
                input type="submit" value="Upload";
            }
        },
    )
}

/// Metadata listing plus the resized preview.
pub fn show(upload: &ProcessedUpload) -> Markup {
    let lines = upload.metadata_lines();
    layout(
        "EXIF viewer",
        html! {
            h1 { "EXIF data" }
            @if lines.is_empty() {
                p { (NO_METADATA) }
            } @else {
                ul.exif {
                    @for (name, value) in &lines {
                        li { b { (name) } " : " (value) }
                    }
                }
            }
            img src={ "/temp/" (upload.stored_name) }
                width=(upload.width)
                height=(upload.height)
                alt="Resized upload";
            p { a href="/" { "Upload another" } }
        },
    )
}

/// Plain page carrying a single message.
pub fn message(text: &str) -> Markup {
    layout(
        "EXIF viewer",
        html! {
            p { (text) }
            p { a href="/" { "Back" } }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use exifview_core::{ExifEntry, ExifValue, MetadataReport};
    use std::path::PathBuf;

    fn upload(metadata: MetadataReport) -> ProcessedUpload {
        ProcessedUpload {
            stored_name: "abc123.jpg".to_string(),
            stored_path: PathBuf::from("temp/abc123.jpg"),
            metadata,
            width: 350,
            height: 175,
            original_width: 700,
            original_height: 350,
        }
    }

    #[test]
    fn index_includes_doctype_and_form() {
        let page = index().into_string();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("name=\"file\""));
        assert!(page.contains("accept=\".jpg,.jpeg\""));
    }

    #[test]
    fn show_without_metadata() {
        let page = show(&upload(MetadataReport::empty())).into_string();
        assert!(page.contains(NO_METADATA));
        assert!(page.contains("src=\"/temp/abc123.jpg\""));
        assert!(page.contains("width=\"350\""));
        assert!(page.contains("height=\"175\""));
    }

    #[test]
    fn show_lists_tags_in_order() {
        let report = MetadataReport::from_entries(vec![
            ExifEntry::new(0x0110, "Model", ExifValue::Text("Model One".into())),
            ExifEntry::new(0x010f, "Make", ExifValue::Text("TestCam".into())),
        ]);
        let page = show(&upload(report)).into_string();

        assert!(!page.contains(NO_METADATA));
        let make = page.find("<b>Make</b> : TestCam").unwrap();
        let model = page.find("<b>Model</b> : Model One").unwrap();
        assert!(make < model);
    }

    #[test]
    fn show_escapes_tag_values() {
        let report = MetadataReport::from_entries(vec![ExifEntry::new(
            0x0131,
            "Software",
            ExifValue::Text("<script>alert(1)</script>".into()),
        )]);
        let page = show(&upload(report)).into_string();

        assert!(!page.contains("<script>"));
        assert!(page.contains("&lt;script&gt;"));
    }

    #[test]
    fn message_escapes_text() {
        let page = message("a < b").into_string();
        assert!(page.contains("a &lt; b"));
    }
}
