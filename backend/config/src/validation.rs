//! Config validation: checks with user-friendly error messages.

use thiserror::Error;

use crate::schema::SomarkConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &SomarkConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_plugin(config, &mut report);
    validate_logging(config, &mut report);
    validate_gateway(config, &mut report);
    report
}

fn validate_plugin(config: &SomarkConfig, report: &mut ValidationReport) {
    if config.api_key.as_deref().map_or(true, |k| k.trim().is_empty()) {
        report.warn("api_key", "No API key configured; extraction requests will be rejected upstream");
    }
    if config.timeout == Some(0) {
        report.error("timeout", "timeout must be > 0 seconds");
    }
}

fn validate_logging(config: &SomarkConfig, report: &mut ValidationReport) {
    let Some(level) = config.logging.as_ref().and_then(|l| l.level.as_deref()) else {
        return;
    };
    // Directives like "somark_relay=debug" are left to the EnvFilter parser.
    if !level.contains('=') && !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
        report.warn("logging.level", format!("Unknown log level '{level}'"));
    }
}

fn validate_gateway(config: &SomarkConfig, report: &mut ValidationReport) {
    let Some(gateway) = &config.gateway else { return };
    if gateway.port == Some(0) {
        report.warn("gateway.port", "port 0 binds an ephemeral port");
    }
    if let Some(bind) = &gateway.bind {
        if bind.trim().is_empty() {
            report.error("gateway.bind", "bind address cannot be empty");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{GatewayConfig, LoggingConfig};

    #[test]
    fn zero_timeout_is_an_error() {
        let cfg = SomarkConfig {
            api_key: Some("k".into()),
            timeout: Some(0),
            ..Default::default()
        };
        let report = validate(&cfg);
        assert!(!report.is_valid());
        assert_eq!(report.errors[0].path, "timeout");
    }

    #[test]
    fn missing_api_key_is_only_a_warning() {
        let report = validate(&SomarkConfig::default());
        assert!(report.is_valid());
        assert!(report.warnings.iter().any(|w| w.path == "api_key"));
    }

    #[test]
    fn unknown_log_level_warns() {
        let cfg = SomarkConfig {
            api_key: Some("k".into()),
            logging: Some(LoggingConfig {
                level: Some("chatty".into()),
                dir: None,
            }),
            ..Default::default()
        };
        let report = validate(&cfg);
        assert!(report.warnings.iter().any(|w| w.path == "logging.level"));
    }

    #[test]
    fn empty_bind_is_an_error() {
        let cfg = SomarkConfig {
            gateway: Some(GatewayConfig {
                bind: Some(" ".into()),
                port: Some(8080),
            }),
            ..Default::default()
        };
        assert!(!validate(&cfg).is_valid());
    }
}
