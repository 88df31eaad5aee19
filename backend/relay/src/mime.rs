//! Content type for the uploaded `file` part.
//!
//! Magic bytes win over the extension; anything unrecognized is sent as
//! `application/octet-stream` and left to the remote service.

use std::path::Path;

pub const PDF: &str = "application/pdf";
pub const PNG: &str = "image/png";
pub const JPEG: &str = "image/jpeg";
pub const OCTET_STREAM: &str = "application/octet-stream";

pub fn detect_content_type(file_name: &str, bytes: &[u8]) -> &'static str {
    sniff(bytes).unwrap_or_else(|| from_extension(file_name))
}

fn sniff(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(b"%PDF-") {
        Some(PDF)
    } else if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        Some(PNG)
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some(JPEG)
    } else {
        None
    }
}

fn from_extension(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("pdf") => PDF,
        Some("png") => PNG,
        Some("jpg" | "jpeg") => JPEG,
        _ => OCTET_STREAM,
    }
}
