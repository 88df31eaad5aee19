//! Plugin Event Logger
//!
//! Structured events (tool_call, tool_result, error) routed through `tracing`
//! under the `plugin_events` target, so the NDJSON file layer picks them up.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::redact::redact_sensitive_data;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PluginEvent {
    ToolCall {
        tool_name: String,
        arguments_json: String,
    },
    ToolResult {
        tool_name: String,
        success: bool,
    },
    Error {
        error_msg: String,
    },
}

#[derive(Debug, Serialize)]
pub struct EventLogEntry {
    pub plugin_id: String,
    pub timestamp: DateTime<Utc>,
    pub event: PluginEvent,
}

pub struct EventLogger;

impl EventLogger {
    /// Redact and emit a plugin event. Returns the entry that was logged.
    pub fn log_event(plugin_id: &str, event: PluginEvent) -> EventLogEntry {
        let event = match event {
            PluginEvent::ToolCall {
                tool_name,
                arguments_json,
            } => PluginEvent::ToolCall {
                tool_name,
                arguments_json: redact_sensitive_data(&arguments_json),
            },
            PluginEvent::Error { error_msg } => PluginEvent::Error {
                error_msg: redact_sensitive_data(&error_msg),
            },
            other => other,
        };

        let entry = EventLogEntry {
            plugin_id: plugin_id.into(),
            timestamp: Utc::now(),
            event,
        };

        let payload = serde_json::to_string(&entry.event).unwrap_or_default();
        info!(target: "plugin_events", plugin = %entry.plugin_id, event = %payload, "Plugin event");
        entry
    }
}
