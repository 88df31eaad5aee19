//! Telemetry and structured logging components for the SoMark sync plugin.
//!
//! Handles log redaction, console and NDJSON file output, and plugin event logging.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{EventLogEntry, EventLogger, PluginEvent};
pub use logger::init_logger;
pub use redact::redact_sensitive_data;
