//! Document extraction through the SoMark API.
//!
//! Reads a local PDF/PNG/JPG, uploads it as multipart form data, and folds the
//! outcome into an [`ExtractionResult`](somark_core::ExtractionResult).

pub mod client;
pub mod mime;
pub mod response;

pub use client::{extract, SomarkClient, API_URL};
pub use mime::detect_content_type;
pub use response::content_from_value;
