use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use somark_core::{ExtractionRequest, OutputFormat, SomarkError, Tool};
use somark_relay::SomarkClient;

pub const EXTRACT_TOOL_NAME: &str = "somark_extract";

/// Arguments accepted by `somark_extract`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtractArgs {
    pub file_path: String,
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

impl From<ExtractArgs> for ExtractionRequest {
    fn from(args: ExtractArgs) -> Self {
        ExtractionRequest::new(args.file_path, args.format)
    }
}

pub struct SomarkExtractTool {
    client: SomarkClient,
}

impl SomarkExtractTool {
    pub fn new(client: SomarkClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for SomarkExtractTool {
    fn name(&self) -> &str {
        EXTRACT_TOOL_NAME
    }

    fn description(&self) -> &str {
        "Extract text and structure from PDF, PNG, or JPG documents. Returns markdown and/or JSON output."
    }

    fn parameters(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "Path to the document file (PDF, PNG, JPG)"
                },
                "format": {
                    "type": "string",
                    "enum": ["markdown", "json", "both"],
                    "default": self.client.default_format().as_str(),
                    "description": "Output format"
                }
            },
            "required": ["file_path"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<Value> {
        let args: ExtractArgs =
            serde_json::from_value(args).map_err(|e| SomarkError::InvalidArguments {
                tool: EXTRACT_TOOL_NAME.to_string(),
                message: e.to_string(),
            })?;

        tracing::debug!(tool = EXTRACT_TOOL_NAME, file = %args.file_path, "Executing tool");
        let result = self.client.extract(&args.into()).await;
        Ok(serde_json::to_value(result)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use somark_config::PluginConfig;

    fn tool() -> SomarkExtractTool {
        let client = SomarkClient::new(&PluginConfig::default())
            .unwrap()
            .with_endpoint("http://127.0.0.1:9/unused");
        SomarkExtractTool::new(client)
    }

    #[test]
    fn schema_requires_file_path() {
        let schema = tool().parameters();
        assert_eq!(schema["required"], json!(["file_path"]));
        assert_eq!(schema["additionalProperties"], false);
        assert_eq!(schema["properties"]["format"]["default"], "both");
    }

    #[tokio::test]
    async fn rejects_missing_file_path() {
        let err = tool().execute(json!({ "format": "json" })).await.unwrap_err();
        let err = err.downcast::<SomarkError>().unwrap();
        assert!(matches!(err, SomarkError::InvalidArguments { .. }));
    }

    #[tokio::test]
    async fn rejects_unknown_format_and_fields() {
        assert!(tool()
            .execute(json!({ "file_path": "a.pdf", "format": "docx" }))
            .await
            .is_err());
        assert!(tool()
            .execute(json!({ "file_path": "a.pdf", "pages": 3 }))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn unreadable_file_comes_back_as_failed_result() {
        let out = tool()
            .execute(json!({ "file_path": "/no/such/dir/receipt.jpg" }))
            .await
            .unwrap();
        assert_eq!(out["success"], false);
        assert_eq!(out["file"], "receipt.jpg");
        assert_eq!(out["error_kind"], "file_read");
        assert!(out["error"].as_str().is_some_and(|e| !e.is_empty()));
    }
}
