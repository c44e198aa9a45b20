use async_trait::async_trait;
use tracing::debug;

use super::{RootDirArgs, Tool};
use crate::commit::generate_commit_message;
use crate::context::ReviewContext;
use crate::error::ToolError;

/// Returns a validated Conventional Commit message as a JSON string.
#[derive(Debug, Default)]
pub struct GenerateCommitMessageTool;

impl GenerateCommitMessageTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for GenerateCommitMessageTool {
    fn name(&self) -> &str {
        "generateCommitMessage"
    }

    fn description(&self) -> &str {
        "Generate a professional conventional commit message."
    }

    fn input_schema(&self) -> serde_json::Value {
        RootDirArgs::schema()
    }

    async fn invoke(
        &self,
        args: serde_json::Value,
        ctx: &ReviewContext,
    ) -> Result<serde_json::Value, ToolError> {
        let args = RootDirArgs::parse(args)?;
        let root = args.root_dir();
        debug!("generateCommitMessage for {}", root.display());

        let message = generate_commit_message(ctx, &root).await?;
        Ok(serde_json::Value::String(message))
    }
}
