use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::SomarkError;
use crate::traits::Tool;

/// Serializable description of a registered tool.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

#[derive(Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn list(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .values()
            .map(|tool| ToolDefinition {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                parameters: tool.parameters(),
            })
            .collect()
    }

    /// Look up `name` and run it with `args`.
    pub async fn invoke(&self, name: &str, args: Value) -> Result<Value, SomarkError> {
        let tool = self
            .get(name)
            .ok_or_else(|| SomarkError::UnknownTool(name.to_string()))?;
        debug!(tool = name, "Invoking tool");
        // Tools surface their own typed errors through anyhow; unwrap them again.
        tool.execute(args)
            .await
            .map_err(|e| e.downcast::<SomarkError>().unwrap_or_else(SomarkError::Other))
    }
}
