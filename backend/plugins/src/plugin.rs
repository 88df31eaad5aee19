//! The SoMark sync plugin as the host sees it: one tool, one gateway method,
//! one CLI command, all backed by the same relay client.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::{json, Value};
use tracing::debug;

use somark_config::PluginConfig;
use somark_core::{ExtractionResult, OutputFormat, SomarkError, ToolRegistry};
use somark_logging::{EventLogger, PluginEvent};
use somark_relay::SomarkClient;
use somark_tools::{SomarkExtractTool, EXTRACT_TOOL_NAME};

use crate::lifecycle::{
    run_load_sequence, run_unload_sequence, DefaultPluginLifecycle, PluginLifecycle,
    PluginLifecycleContext, PluginState,
};
use crate::manifest::PluginManifest;
use crate::status::PluginStatus;
use crate::PLUGIN_ID;

pub struct SomarkSyncPlugin {
    config: PluginConfig,
    manifest: PluginManifest,
    tools: ToolRegistry,
    state: PluginState,
    lifecycle: Arc<dyn PluginLifecycle>,
}

impl SomarkSyncPlugin {
    /// Load the plugin against the real SoMark endpoint.
    pub async fn load(config: PluginConfig) -> Result<Self> {
        let client = SomarkClient::new(&config)?;
        Self::load_with(config, client, Arc::new(DefaultPluginLifecycle)).await
    }

    /// Load with an explicit client (e.g. pointed at another endpoint) and lifecycle.
    pub async fn load_with(
        config: PluginConfig,
        client: SomarkClient,
        lifecycle: Arc<dyn PluginLifecycle>,
    ) -> Result<Self> {
        let mut tools = ToolRegistry::new();
        tools.register(Arc::new(SomarkExtractTool::new(client)));

        let manifest = PluginManifest::somark_sync(&tools);
        manifest.validate().context("invalid plugin manifest")?;

        let ctx = lifecycle_context(&manifest, &config);
        let state = run_load_sequence(lifecycle.as_ref(), &ctx).await?;

        Ok(Self {
            config,
            manifest,
            tools,
            state,
            lifecycle,
        })
    }

    pub fn manifest(&self) -> &PluginManifest {
        &self.manifest
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn state(&self) -> PluginState {
        self.state
    }

    /// `somark_sync.status`: no I/O, no secrets.
    pub fn status(&self) -> PluginStatus {
        PluginStatus::from_config(&self.config)
    }

    /// Invoke a registered tool, recording the call and its outcome as plugin events.
    pub async fn invoke_tool(&self, name: &str, args: Value) -> Result<Value, SomarkError> {
        EventLogger::log_event(
            PLUGIN_ID,
            PluginEvent::ToolCall {
                tool_name: name.to_string(),
                arguments_json: args.to_string(),
            },
        );

        match self.tools.invoke(name, args).await {
            Ok(output) => {
                let success = output.get("success").and_then(Value::as_bool).unwrap_or(true);
                EventLogger::log_event(
                    PLUGIN_ID,
                    PluginEvent::ToolResult {
                        tool_name: name.to_string(),
                        success,
                    },
                );
                Ok(output)
            }
            Err(e) => {
                EventLogger::log_event(PLUGIN_ID, PluginEvent::Error { error_msg: e.to_string() });
                Err(e)
            }
        }
    }

    /// The CLI path: route through the registered tool exactly like a host tool call.
    pub async fn extract(
        &self,
        file_path: impl Into<PathBuf>,
        format: Option<OutputFormat>,
    ) -> Result<ExtractionResult, SomarkError> {
        let file_path = file_path.into();
        let mut args = json!({ "file_path": file_path.to_string_lossy() });
        if let Some(format) = format {
            args["format"] = json!(format);
        }
        let output = self.invoke_tool(EXTRACT_TOOL_NAME, args).await?;
        serde_json::from_value(output)
            .map_err(|e| SomarkError::Other(anyhow::Error::new(e).context("malformed tool output")))
    }

    pub async fn unload(&mut self) -> PluginState {
        let ctx = lifecycle_context(&self.manifest, &self.config);
        self.state = run_unload_sequence(self.lifecycle.as_ref(), &ctx).await;
        debug!(plugin = PLUGIN_ID, state = ?self.state, "Unload finished");
        self.state
    }
}

fn lifecycle_context(manifest: &PluginManifest, config: &PluginConfig) -> PluginLifecycleContext {
    PluginLifecycleContext {
        plugin_id: manifest.id.clone(),
        plugin_version: manifest.version.clone(),
        config: json!({
            "has_api_key": config.has_api_key(),
            "output_format": config.output_format,
            "timeout": config.timeout_seconds,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use somark_core::ErrorKind;

    async fn plugin() -> SomarkSyncPlugin {
        let config = PluginConfig {
            api_key: "plugin-test-key".into(),
            output_format: OutputFormat::Both,
            timeout_seconds: 5,
        };
        let client = SomarkClient::new(&config)
            .unwrap()
            .with_endpoint("http://127.0.0.1:9/unused");
        SomarkSyncPlugin::load_with(config, client, Arc::new(DefaultPluginLifecycle))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn load_registers_extract_tool() {
        let plugin = plugin().await;
        assert_eq!(plugin.state(), PluginState::Active);
        assert_eq!(plugin.tools().list(), vec![EXTRACT_TOOL_NAME.to_string()]);
        assert_eq!(plugin.manifest().tools[0].name, EXTRACT_TOOL_NAME);
    }

    #[tokio::test]
    async fn status_hides_key() {
        let plugin = plugin().await;
        let status = serde_json::to_value(plugin.status()).unwrap();
        assert_eq!(status["plugin"], "somark-sync");
        assert_eq!(status["status"], "running");
        assert_eq!(status["config"]["has_api_key"], true);
        assert_eq!(status["config"]["output_format"], "both");
        assert!(!status.to_string().contains("plugin-test-key"));
    }

    #[tokio::test]
    async fn extract_for_missing_file_is_in_band_failure() {
        let plugin = plugin().await;
        let result = plugin
            .extract("/missing/dir/contract.pdf", Some(OutputFormat::Json))
            .await
            .unwrap();
        assert!(!result.success);
        assert_eq!(result.file, "contract.pdf");
        assert_eq!(result.error_kind, Some(ErrorKind::FileRead));
    }

    #[tokio::test]
    async fn unknown_tool_is_rejected() {
        let plugin = plugin().await;
        let err = plugin.invoke_tool("nope", json!({})).await.unwrap_err();
        assert!(matches!(err, SomarkError::UnknownTool(_)));
    }

    #[tokio::test]
    async fn unload_transitions_state() {
        let mut plugin = plugin().await;
        assert_eq!(plugin.unload().await, PluginState::Unloaded);
    }
}
