//! `somark-config`: SoMark sync plugin configuration.
//!
//! Provides:
//! - Typed config schema and the resolved `PluginConfig`
//! - YAML loading from `~/.somark/config.yaml` (or an explicit path)
//! - `${ENV_VAR}` substitution and `SOMARK_*` overrides
//! - Default value application
//! - Validation and redaction for safe display

pub mod defaults;
pub mod env;
pub mod io;
pub mod redact;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use env::{apply_env_overrides, resolve_env_vars_with, MissingEnvVarError};
pub use io::{config_dir, config_file_path, load_config};
pub use redact::{redact, redacted_config};
pub use schema::{GatewayConfig, LoggingConfig, PluginConfig, SomarkConfig};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value;

/// Load, substitute env vars, apply overrides and defaults, then validate.
///
/// This is the main entry point for loading a config at startup.
pub async fn load_and_prepare(path: &Path) -> Result<SomarkConfig> {
    let raw = load_config(path).await?;
    prepare(raw, &std::env::vars().collect())
}

/// Everything after the file read, with an explicit environment.
pub fn prepare(raw: SomarkConfig, env: &HashMap<String, String>) -> Result<SomarkConfig> {
    let value: Value =
        serde_json::to_value(&raw).context("Failed to serialize config for processing")?;
    let value = resolve_env_vars_with(&value, env).context("Failed to resolve env vars in config")?;
    let config: SomarkConfig =
        serde_json::from_value(value).context("Failed to deserialize config after processing")?;

    let config = apply_env_overrides(config, env)?;
    let config = apply_all_defaults(config);

    let report = validate(&config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    if let Some(first) = report.errors.first() {
        for error in &report.errors {
            tracing::error!(path = %error.path, message = %error.message, "Config error");
        }
        bail!(somark_core::SomarkError::ConfigError(first.to_string()));
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use somark_core::OutputFormat;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn prepare_resolves_reference_and_defaults() {
        let raw = SomarkConfig {
            api_key: Some("${MY_SOMARK_KEY}".into()),
            ..Default::default()
        };
        let cfg = prepare(raw, &env(&[("MY_SOMARK_KEY", "key-1")])).unwrap();
        let plugin = cfg.plugin_config();
        assert_eq!(plugin.api_key, "key-1");
        assert_eq!(plugin.output_format, OutputFormat::Both);
        assert_eq!(plugin.timeout_seconds, 120);
    }

    #[test]
    fn prepare_rejects_zero_timeout() {
        let raw = SomarkConfig {
            timeout: Some(0),
            ..Default::default()
        };
        let err = prepare(raw, &HashMap::new()).unwrap_err();
        assert!(err.to_string().contains("timeout"));
    }

    #[tokio::test]
    async fn load_and_prepare_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_file_path(dir.path());
        std::fs::write(&path, "api_key: file-key\ntimeout: 5\n").unwrap();
        let cfg = load_and_prepare(&path).await.unwrap();
        assert_eq!(cfg.timeout, Some(5));
    }
}
