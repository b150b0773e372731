//! Synthetic Telegram payloads and a stub OCR engine for tests

use std::path::PathBuf;

use serde_json::{json, Value};
use teloxide::types::Message;

/// Build a Message from a payload, filling in the envelope fields every
/// Telegram message carries.
pub fn message_from(mut payload: Value) -> Message {
    let base = json!({
        "message_id": 1,
        "date": 1700000000,
        "chat": {"id": 5, "type": "private", "first_name": "Test"},
        "from": {"id": 5, "is_bot": false, "first_name": "Test"}
    });
    let map = payload.as_object_mut().unwrap();
    for (k, v) in base.as_object().unwrap() {
        map.entry(k.clone()).or_insert(v.clone());
    }
    serde_json::from_value(payload).unwrap()
}

/// A private-chat text message
pub fn text_message(text: &str) -> Message {
    message_from(json!({"text": text}))
}

/// A photo message with two resolutions; `file_size` applies to the larger
pub fn photo_message(file_size: u32) -> Message {
    message_from(json!({
        "photo": [
            {"file_id": "ph-small", "file_unique_id": "u1", "width": 90, "height": 51, "file_size": 1000},
            {"file_id": "ph-large", "file_unique_id": "u2", "width": 1280, "height": 720, "file_size": file_size}
        ]
    }))
}

/// A document message with the given declared content type
pub fn document_message(mime_type: &str, file_size: u32) -> Message {
    message_from(json!({
        "document": {
            "file_id": "doc1",
            "file_unique_id": "u3",
            "file_size": file_size,
            "file_name": "scan",
            "mime_type": mime_type
        }
    }))
}

/// Encode a small real PNG the imaging service can decode
pub fn tiny_png() -> Vec<u8> {
    let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
        2,
        2,
        image::Rgb([255, 255, 255]),
    ));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

/// Write an executable stub standing in for the Tesseract binary. The stub
/// drains stdin and prints `output`.
#[cfg(unix)]
pub fn fake_ocr_engine(dir: &tempfile::TempDir, output: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.path().join("tesseract");
    std::fs::write(
        &path,
        format!("#!/bin/sh\ncat >/dev/null\nprintf '%s' {}\n", shell_quote(output)),
    )
    .unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[cfg(unix)]
fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}
