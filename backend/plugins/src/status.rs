use serde::{Deserialize, Serialize};

use somark_config::PluginConfig;
use somark_core::OutputFormat;

/// Reply to `somark_sync.status`. Only non-secret facts about the config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginStatus {
    pub plugin: String,
    pub status: String,
    pub config: StatusConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusConfig {
    pub has_api_key: bool,
    pub output_format: OutputFormat,
}

impl PluginStatus {
    pub fn from_config(config: &PluginConfig) -> Self {
        Self {
            plugin: crate::PLUGIN_ID.to_string(),
            status: "running".to_string(),
            config: StatusConfig {
                has_api_key: config.has_api_key(),
                output_format: config.output_format,
            },
        }
    }
}
