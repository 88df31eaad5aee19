use async_trait::async_trait;
use serde_json::Value;

/// A capability the host can invoke by name.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name of the tool (e.g., "somark_extract").
    fn name(&self) -> &str;

    /// Description shown to the calling agent.
    fn description(&self) -> &str;

    /// JSON Schema for the tool's parameters.
    fn parameters(&self) -> Value;

    /// Execute the tool with the given arguments and return structured output.
    async fn execute(&self, args: Value) -> Result<Value, anyhow::Error>;
}
