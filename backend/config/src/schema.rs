//! SoMark sync configuration schema.
//!
//! `SomarkConfig` is the on-disk shape (every field optional, filled by
//! `defaults`). `PluginConfig` is the resolved, immutable view handed to the relay.

use std::fmt;

use serde::{Deserialize, Serialize};
use somark_core::OutputFormat;

use crate::defaults::{DEFAULT_BIND_ADDRESS, DEFAULT_GATEWAY_PORT, DEFAULT_LOG_LEVEL, DEFAULT_TIMEOUT_SECS};

// ---------------------------------------------------------------------------
// File config
// ---------------------------------------------------------------------------

/// Root of `config.yaml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SomarkConfig {
    /// SoMark API key, sent as a form field on every request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Default output format when a caller does not pass one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_format: Option<OutputFormat>,

    /// Request timeout in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<GatewayConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive, e.g. "info" or "somark_relay=debug"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Directory for rolling NDJSON logs; console only when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

impl SomarkConfig {
    /// Resolved view used by the relay.
    pub fn plugin_config(&self) -> PluginConfig {
        PluginConfig {
            api_key: self.api_key.clone().unwrap_or_default(),
            output_format: self.output_format.unwrap_or_default(),
            timeout_seconds: self.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_dir(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.dir.as_deref())
    }

    pub fn gateway_bind(&self) -> &str {
        self.gateway
            .as_ref()
            .and_then(|g| g.bind.as_deref())
            .unwrap_or(DEFAULT_BIND_ADDRESS)
    }

    pub fn gateway_port(&self) -> u16 {
        self.gateway
            .as_ref()
            .and_then(|g| g.port)
            .unwrap_or(DEFAULT_GATEWAY_PORT)
    }
}

// ---------------------------------------------------------------------------
// Plugin config
// ---------------------------------------------------------------------------

/// Immutable relay settings, built once at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct PluginConfig {
    pub api_key: String,
    pub output_format: OutputFormat,
    pub timeout_seconds: u64,
}

impl PluginConfig {
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            output_format: OutputFormat::default(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }
}

// The key never reaches logs through `{:?}`.
impl fmt::Debug for PluginConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginConfig")
            .field("api_key", &if self.has_api_key() { "***" } else { "" })
            .field("output_format", &self.output_format)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}
