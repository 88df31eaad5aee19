//! Environment handling for config values.
//!
//! Two passes run at load time:
//! - `${VAR_NAME}` references inside string values are substituted
//!   (uppercase `[A-Z_][A-Z0-9_]*` names only; `$${VAR}` stays a literal `${VAR}`).
//! - `SOMARK_*` variables override the file values.

use std::collections::HashMap;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;
use somark_core::OutputFormat;

use crate::schema::SomarkConfig;

pub const ENV_API_KEY: &str = "SOMARK_API_KEY";
pub const ENV_OUTPUT_FORMAT: &str = "SOMARK_OUTPUT_FORMAT";
pub const ENV_TIMEOUT: &str = "SOMARK_TIMEOUT";

/// Matches `${VAR}` and the escaped form `$${VAR}`.
static ENV_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\$?)\$\{([A-Z_][A-Z0-9_]*)\}").expect("valid env ref pattern"));

/// Error returned for missing env vars.
#[derive(Debug, thiserror::Error)]
#[error("Missing env var \"{var_name}\" referenced at config path: {config_path}")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub config_path: String,
}

/// Substitute `${VAR}` references using a provided map.
pub fn resolve_env_vars_with(
    value: &Value,
    env: &HashMap<String, String>,
) -> Result<Value, MissingEnvVarError> {
    walk(value, env, "")
}

fn walk(value: &Value, env: &HashMap<String, String>, path: &str) -> Result<Value, MissingEnvVarError> {
    match value {
        Value::String(s) => substitute(s, env, path).map(Value::String),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| walk(v, env, &format!("{path}[{i}]")))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Value::Object(map) => {
            let mut out = serde_json::Map::with_capacity(map.len());
            for (k, v) in map {
                let child = if path.is_empty() { k.clone() } else { format!("{path}.{k}") };
                out.insert(k.clone(), walk(v, env, &child)?);
            }
            Ok(Value::Object(out))
        }
        other => Ok(other.clone()),
    }
}

fn substitute(s: &str, env: &HashMap<String, String>, path: &str) -> Result<String, MissingEnvVarError> {
    if !s.contains("${") {
        return Ok(s.to_string());
    }

    let mut missing = None;
    let replaced = ENV_REF.replace_all(s, |caps: &Captures| {
        let name = &caps[2];
        if !caps[1].is_empty() {
            return format!("${{{name}}}");
        }
        match env.get(name) {
            Some(val) if !val.is_empty() => val.clone(),
            _ => {
                missing.get_or_insert_with(|| MissingEnvVarError {
                    var_name: name.to_string(),
                    config_path: path.to_string(),
                });
                String::new()
            }
        }
    });

    match missing {
        Some(err) => Err(err),
        None => Ok(replaced.into_owned()),
    }
}

/// Apply `SOMARK_API_KEY`, `SOMARK_OUTPUT_FORMAT` and `SOMARK_TIMEOUT` on top of the file config.
///
/// Empty variables are ignored.
pub fn apply_env_overrides(
    mut config: SomarkConfig,
    env: &HashMap<String, String>,
) -> Result<SomarkConfig> {
    let get = |name: &str| env.get(name).map(|v| v.trim()).filter(|v| !v.is_empty());

    if let Some(key) = get(ENV_API_KEY) {
        config.api_key = Some(key.to_string());
    }
    if let Some(format) = get(ENV_OUTPUT_FORMAT) {
        let parsed = format
            .parse::<OutputFormat>()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("{ENV_OUTPUT_FORMAT} is invalid"))?;
        config.output_format = Some(parsed);
    }
    if let Some(timeout) = get(ENV_TIMEOUT) {
        let secs: u64 = timeout
            .parse()
            .with_context(|| format!("{ENV_TIMEOUT} must be a whole number of seconds"))?;
        config.timeout = Some(secs);
    }
    Ok(config)
}
