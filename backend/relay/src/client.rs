//! SoMark extraction client.
//!
//! One call is one file read and one multipart POST. No retries, no caching.
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

use somark_config::PluginConfig;
use somark_core::{ExtractError, ExtractedContent, ExtractionRequest, ExtractionResult, OutputFormat};

use crate::mime::detect_content_type;
use crate::response::content_from_value;

/// Synchronous extraction endpoint.
pub const API_URL: &str = "https://somark.soulcode.cn/api/v1/extract/acc_sync";

#[derive(Debug, Clone)]
pub struct SomarkClient {
    http: Client,
    endpoint: String,
    api_key: String,
    default_format: OutputFormat,
    timeout: Duration,
}

impl SomarkClient {
    /// Build a client from the resolved plugin config.
    pub fn new(config: &PluginConfig) -> Result<Self> {
        // Idle pooling is off: concurrent calls each get their own connection.
        let http = Client::builder()
            .pool_max_idle_per_host(0)
            .user_agent(concat!("somark-sync/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to initialize HTTP client for SoMark")?;

        Ok(Self {
            http,
            endpoint: API_URL.to_string(),
            api_key: config.api_key.clone(),
            default_format: config.output_format,
            timeout: Duration::from_secs(config.timeout_seconds),
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn default_format(&self) -> OutputFormat {
        self.default_format
    }

    /// Run one extraction. Never fails: every error is folded into the result.
    pub async fn extract(&self, request: &ExtractionRequest) -> ExtractionResult {
        let file = request.file_name();
        let format = request.format.unwrap_or(self.default_format);
        let started = Instant::now();

        let outcome = self.try_extract(&request.file_path, &file, format).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &outcome {
            Ok(content) => info!(
                file = %file,
                format = %format,
                elapsed_ms,
                markdown_len = content.markdown.len(),
                json_len = content.json.len(),
                "SoMark extraction succeeded"
            ),
            Err(e) => warn!(
                file = %file,
                format = %format,
                elapsed_ms,
                kind = ?e.kind(),
                error = %e,
                "SoMark extraction failed"
            ),
        }

        ExtractionResult::from_outcome(file, format, outcome)
    }

    async fn try_extract(
        &self,
        path: &Path,
        file_name: &str,
        format: OutputFormat,
    ) -> Result<ExtractedContent, ExtractError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ExtractError::FileRead {
                file: file_name.to_string(),
                source,
            })?;
        debug!(file = %file_name, bytes = bytes.len(), "Read document");

        let form = build_form(bytes, file_name, format, &self.api_key)?;
        let resp = self
            .http
            .post(&self.endpoint)
            .multipart(form)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.transport_error(e))?;
        if !status.is_success() {
            return Err(ExtractError::Remote {
                status: status.as_u16(),
                body,
            });
        }

        let value: Value = serde_json::from_str(&body)?;
        Ok(content_from_value(&value))
    }

    fn transport_error(&self, err: reqwest::Error) -> ExtractError {
        if err.is_timeout() {
            ExtractError::Timeout {
                after: self.timeout,
            }
        } else {
            ExtractError::Transport(error_chain(&err))
        }
    }
}

/// `file`, `output_formats` and `api_key`, in that order.
fn build_form(
    bytes: Vec<u8>,
    file_name: &str,
    format: OutputFormat,
    api_key: &str,
) -> Result<Form, ExtractError> {
    let content_type = detect_content_type(file_name, &bytes);
    let part = Part::bytes(bytes)
        .file_name(file_name.to_string())
        .mime_str(content_type)
        .map_err(|e| ExtractError::Transport(e.to_string()))?;

    let formats = Value::from(format.requested().to_vec()).to_string();

    Ok(Form::new()
        .part("file", part)
        .text("output_formats", formats)
        .text("api_key", api_key.to_string()))
}

fn error_chain(err: &reqwest::Error) -> String {
    let mut msg = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        let text = cause.to_string();
        if !msg.contains(&text) {
            msg.push_str(": ");
            msg.push_str(&text);
        }
        source = cause.source();
    }
    msg
}

/// One-shot form of [`SomarkClient::extract`] for callers without a long-lived client.
pub async fn extract(request: &ExtractionRequest, config: &PluginConfig) -> ExtractionResult {
    match SomarkClient::new(config) {
        Ok(client) => client.extract(request).await,
        Err(e) => {
            let format = request.format.unwrap_or(config.output_format);
            ExtractionResult::from_outcome(
                request.file_name(),
                format,
                Err(ExtractError::Transport(format!("{e:#}"))),
            )
        }
    }
}
