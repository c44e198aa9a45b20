use tracing::debug;

use super::{GenerateCommitMessageTool, GetFileChangesTool, Tool, ToolDefinition};
use crate::context::ReviewContext;
use crate::error::ToolError;

/// Tools in registration order.
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Registry holding `getFileChanges` and `generateCommitMessage`.
    pub fn with_builtin_tools() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(GetFileChangesTool::new()));
        registry.register(Box::new(GenerateCommitMessageTool::new()));
        registry
    }

    /// Register `tool`, replacing any tool with the same name.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        debug!("Registering tool {}", tool.name());
        self.tools.retain(|t| t.name() != tool.name());
        self.tools.push(tool);
    }

    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|t| t.name() == name)
            .map(|t| t.as_ref())
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.to_definition()).collect()
    }

    /// Invoke the tool called `name`.
    pub async fn call(
        &self,
        name: &str,
        args: serde_json::Value,
        ctx: &ReviewContext,
    ) -> Result<serde_json::Value, ToolError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        tool.invoke(args, ctx).await
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::with_builtin_tools()
    }
}
