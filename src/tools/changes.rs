use async_trait::async_trait;
use tracing::debug;

use super::{RootDirArgs, Tool};
use crate::commit::collect_changes;
use crate::context::ReviewContext;
use crate::error::ToolError;

/// Returns the collected change set as a list of `{file, diff}` objects.
#[derive(Debug, Default)]
pub struct GetFileChangesTool;

impl GetFileChangesTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for GetFileChangesTool {
    fn name(&self) -> &str {
        "getFileChanges"
    }

    fn description(&self) -> &str {
        "Gets the code changes made in given directory."
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
        debug!("getFileChanges for {}", root.display());

        let changes = collect_changes(ctx.version_control(), &root, ctx.exclusions()).await?;
        serde_json::to_value(changes).map_err(ToolError::Serialization)
    }
}
