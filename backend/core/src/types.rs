use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, ExtractError};

/// Which structured result(s) the remote service should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Markdown,
    Json,
    #[default]
    Both,
}

impl OutputFormat {
    /// Entries sent upstream in the `output_formats` selection list.
    pub fn requested(self) -> &'static [&'static str] {
        match self {
            Self::Markdown => &["markdown"],
            Self::Json => &["json"],
            Self::Both => &["markdown", "json"],
        }
    }

    pub fn wants_markdown(self) -> bool {
        matches!(self, Self::Markdown | Self::Both)
    }

    pub fn wants_json(self) -> bool {
        matches!(self, Self::Json | Self::Both)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Json => "json",
            Self::Both => "both",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "markdown" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            "both" => Ok(Self::Both),
            other => Err(format!(
                "unknown output format '{other}' (expected markdown, json or both)"
            )),
        }
    }
}

/// A single extraction call. `format: None` falls back to the configured default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    pub file_path: PathBuf,
    pub format: Option<OutputFormat>,
}

impl ExtractionRequest {
    pub fn new(file_path: impl Into<PathBuf>, format: Option<OutputFormat>) -> Self {
        Self {
            file_path: file_path.into(),
            format,
        }
    }

    /// Filename component of the request path, as reported back to callers.
    pub fn file_name(&self) -> String {
        basename(&self.file_path)
    }
}

/// Content returned by the remote service for the requested formats.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedContent {
    pub markdown: String,
    pub json: String,
}

/// Uniform output of every entry point (tool, CLI, gateway).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub success: bool,
    pub file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl ExtractionResult {
    pub fn succeeded(file: impl Into<String>, format: OutputFormat, content: ExtractedContent) -> Self {
        Self {
            success: true,
            file: file.into(),
            markdown: format.wants_markdown().then_some(content.markdown),
            json: format.wants_json().then_some(content.json),
            error: None,
            error_kind: None,
        }
    }

    pub fn failed(file: impl Into<String>, err: &ExtractError) -> Self {
        Self {
            success: false,
            file: file.into(),
            markdown: None,
            json: None,
            error: Some(err.to_string()),
            error_kind: Some(err.kind()),
        }
    }

    /// Collapse a relay outcome into the result record.
    pub fn from_outcome(
        file: impl Into<String>,
        format: OutputFormat,
        outcome: Result<ExtractedContent, ExtractError>,
    ) -> Self {
        match outcome {
            Ok(content) => Self::succeeded(file, format, content),
            Err(err) => Self::failed(file, &err),
        }
    }
}

/// Filename of `path` without directory segments.
///
/// Falls back to the path as given when it has no final component (e.g. `/` or `..`).
pub fn basename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requested_formats_per_variant() {
        assert_eq!(OutputFormat::Markdown.requested(), ["markdown"]);
        assert_eq!(OutputFormat::Json.requested(), ["json"]);
        assert_eq!(OutputFormat::Both.requested(), ["markdown", "json"]);
    }

    #[test]
    fn default_format_is_both() {
        assert_eq!(OutputFormat::default(), OutputFormat::Both);
    }

    #[test]
    fn parses_format_case_insensitively() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("pdf".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn basename_strips_directories() {
        assert_eq!(basename(Path::new("/tmp/scans/invoice.pdf")), "invoice.pdf");
        assert_eq!(basename(Path::new("relative/dir/page.png")), "page.png");
        assert_eq!(basename(Path::new("plain.jpg")), "plain.jpg");
    }

    #[test]
    fn success_only_carries_requested_fields() {
        let content = ExtractedContent {
            markdown: "# Title".into(),
            json: "{}".into(),
        };
        let result = ExtractionResult::succeeded("a.pdf", OutputFormat::Markdown, content);
        assert!(result.success);
        assert_eq!(result.markdown.as_deref(), Some("# Title"));
        assert!(result.json.is_none());
        assert!(result.error.is_none());
    }

    #[test]
    fn failure_serializes_without_content_fields() {
        let err = ExtractError::Remote {
            status: 500,
            body: "internal error".into(),
        };
        let result = ExtractionResult::failed("a.pdf", &err);
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["file"], "a.pdf");
        assert_eq!(value["error_kind"], "remote");
        assert!(value.get("markdown").is_none());
        assert!(value.get("json").is_none());
    }
}
