//! Config defaults: applies sensible default values to parsed config.

use somark_core::OutputFormat;

use crate::schema::{GatewayConfig, LoggingConfig, SomarkConfig};

/// Default request timeout (seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";

pub const DEFAULT_GATEWAY_PORT: u16 = 18790;

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: SomarkConfig) -> SomarkConfig {
    let config = apply_plugin_defaults(config);
    let config = apply_logging_defaults(config);
    apply_gateway_defaults(config)
}

fn apply_plugin_defaults(mut config: SomarkConfig) -> SomarkConfig {
    if config.api_key.is_none() {
        config.api_key = Some(String::new());
    }
    if config.output_format.is_none() {
        config.output_format = Some(OutputFormat::Both);
    }
    if config.timeout.is_none() {
        config.timeout = Some(DEFAULT_TIMEOUT_SECS);
    }
    config
}

fn apply_logging_defaults(mut config: SomarkConfig) -> SomarkConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    if logging.level.is_none() {
        logging.level = Some(DEFAULT_LOG_LEVEL.to_string());
    }
    config
}

fn apply_gateway_defaults(mut config: SomarkConfig) -> SomarkConfig {
    let gateway = config.gateway.get_or_insert_with(GatewayConfig::default);
    if gateway.bind.is_none() {
        gateway.bind = Some(DEFAULT_BIND_ADDRESS.to_string());
    }
    if gateway.port.is_none() {
        gateway.port = Some(DEFAULT_GATEWAY_PORT);
    }
    config
}
