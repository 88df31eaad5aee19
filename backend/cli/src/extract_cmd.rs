//! `somark extract <file> [-f <format>]`

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use somark_core::{ExtractionResult, OutputFormat};
use somark_plugins::SomarkSyncPlugin;

/// Run one extraction and print the result. A failed extraction is still
/// printed and is not an error for the process.
pub async fn run(plugin: &SomarkSyncPlugin, file: PathBuf, format: Option<OutputFormat>) -> Result<()> {
    let result = plugin.extract(file, format).await?;
    info!(file = %result.file, success = result.success, "Extraction finished");
    println!("{}", render(&result)?);
    Ok(())
}

pub fn render(result: &ExtractionResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use somark_core::{ExtractError, ExtractedContent};

    #[test]
    fn renders_failure_shape() {
        let result = ExtractionResult::failed("scan.png", &ExtractError::Transport("refused".into()));
        let out = render(&result).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["file"], "scan.png");
        assert!(value.get("markdown").is_none());
        assert!(out.contains('\n'));
    }

    #[test]
    fn renders_only_requested_fields() {
        let content = ExtractedContent {
            markdown: "# Title".into(),
            json: "{}".into(),
        };
        let result = ExtractionResult::succeeded("doc.pdf", OutputFormat::Markdown, content);
        let value: serde_json::Value = serde_json::from_str(&render(&result).unwrap()).unwrap();
        assert_eq!(value["markdown"], "# Title");
        assert!(value.get("json").is_none());
    }
}
