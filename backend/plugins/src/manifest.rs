//! Plugin manifest: describes what the SoMark sync plugin registers with the host.
use serde::{Deserialize, Serialize};

use somark_core::ToolRegistry;

/// The permissions a plugin requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginPermissions {
    pub network: bool,
    pub filesystem: bool,
    pub shell: bool,
}

/// A tool slot exposed by a plugin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginToolSlot {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginManifest {
    pub id: String,
    pub name: String,
    pub version: String,
    pub description: String,
    pub homepage: Option<String>,
    pub permissions: PluginPermissions,
    #[serde(default)]
    pub tools: Vec<PluginToolSlot>,
    /// Gateway RPC methods handled by the plugin.
    #[serde(default)]
    pub gateway_methods: Vec<String>,
    /// Top-level CLI commands contributed by the plugin.
    #[serde(default)]
    pub commands: Vec<String>,
}

impl PluginManifest {
    /// Manifest for the SoMark sync plugin, with tool slots taken from `tools`.
    pub fn somark_sync(tools: &ToolRegistry) -> Self {
        Self {
            id: crate::PLUGIN_ID.to_string(),
            name: "SoMark Sync Extractor".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: "Extract text and structure from PDF and images using SoMark API."
                .to_string(),
            homepage: Some("https://somark.soulcode.cn".to_string()),
            permissions: PluginPermissions {
                network: true,
                filesystem: true,
                shell: false,
            },
            tools: tools
                .definitions()
                .into_iter()
                .map(|def| PluginToolSlot {
                    name: def.name,
                    description: def.description,
                    input_schema: def.parameters,
                })
                .collect(),
            gateway_methods: vec![crate::STATUS_METHOD.to_string()],
            commands: vec!["extract".to_string()],
        }
    }

    /// Validate the manifest for required fields.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.id.is_empty() {
            anyhow::bail!("Plugin manifest missing 'id'");
        }
        if self.name.is_empty() {
            anyhow::bail!("Plugin manifest missing 'name'");
        }
        if self.version.is_empty() {
            anyhow::bail!("Plugin manifest missing 'version'");
        }
        if let Some(slot) = self.tools.iter().find(|t| t.name.is_empty()) {
            anyhow::bail!("Plugin manifest has a tool without a name: {}", slot.description);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_id_fails_validation() {
        let mut manifest = PluginManifest::somark_sync(&ToolRegistry::new());
        assert!(manifest.validate().is_ok());
        manifest.id.clear();
        assert!(manifest.validate().is_err());
    }

    #[test]
    fn declares_status_method_and_extract_command() {
        let manifest = PluginManifest::somark_sync(&ToolRegistry::new());
        assert_eq!(manifest.gateway_methods, vec!["somark_sync.status"]);
        assert_eq!(manifest.commands, vec!["extract"]);
        assert!(manifest.permissions.network);
        assert!(!manifest.permissions.shell);
    }
}
