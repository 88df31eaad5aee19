//! Config resolution for the CLI: explicit `--config` path or the default
//! location, then the shared load pipeline.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use somark_config::{config_dir, config_file_path, load_and_prepare, redacted_config, SomarkConfig};

pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => config_file_path(&config_dir()),
    }
}

pub async fn load(explicit: Option<&Path>) -> Result<SomarkConfig> {
    let path = resolve_path(explicit);
    load_and_prepare(&path)
        .await
        .with_context(|| format!("Failed to load config from {}", path.display()))
}

/// Pretty JSON of the config with secrets masked.
pub fn render_redacted(config: &SomarkConfig) -> Result<String> {
    Ok(serde_json::to_string_pretty(&redacted_config(config))?)
}
