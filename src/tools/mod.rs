//! Operations exposed to an orchestrating agent.
//!
//! Each tool declares a JSON input schema and returns a JSON value. Input is validated before any
//! repository or model I/O happens.

pub mod changes;
pub mod commit_message;
pub mod registry;

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::context::ReviewContext;
use crate::error::ToolError;

pub use changes::GetFileChangesTool;
pub use commit_message::GenerateCommitMessageTool;
pub use registry::ToolRegistry;

/// Name, description, and input schema advertised for a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn input_schema(&self) -> serde_json::Value;

    fn to_definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
        }
    }

    async fn invoke(
        &self,
        args: serde_json::Value,
        ctx: &ReviewContext,
    ) -> Result<serde_json::Value, ToolError>;
}

/// Input shared by every tool: the directory to analyze.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RootDirArgs {
    #[serde(rename = "rootDir")]
    root_dir: String,
}

impl RootDirArgs {
    /// Deserialize and check `rootDir` is present and non-empty.
    pub fn parse(args: serde_json::Value) -> Result<Self, ToolError> {
        let args: Self = serde_json::from_value(args)
            .map_err(|e| ToolError::SchemaValidation(e.to_string()))?;
        if args.root_dir.is_empty() {
            return Err(ToolError::SchemaValidation(
                "rootDir must be at least 1 character".to_string(),
            ));
        }
        Ok(args)
    }

    pub fn root_dir(&self) -> PathBuf {
        PathBuf::from(&self.root_dir)
    }

    /// JSON schema matching what [`RootDirArgs::parse`] accepts.
    pub fn schema() -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "rootDir": {
                    "type": "string",
                    "minLength": 1,
                    "description": "Directory inside the git repository to analyze"
                }
            },
            "required": ["rootDir"]
        })
    }
}
