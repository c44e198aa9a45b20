//! Commit message generation from the working-tree changes.

use std::path::Path;

use tracing::{debug, info};

use crate::commit::collect::collect_changes;
use crate::commit::prompt::{COMMIT_SYSTEM_INSTRUCTION, build_commit_prompt};
use crate::commit::summary::summarize;
use crate::commit::validate::validate;
use crate::context::ReviewContext;
use crate::error::{CommitError, CompletionError};
use crate::llm::CompletionRequest;

/// Returned when there is nothing to commit. No model call is made.
pub const NO_CHANGES_MESSAGE: &str = "chore: no changes detected.";

/// Generate one Conventional Commit message for every pending change under `root`.
///
/// The model output is trimmed and validated; a valid message is returned exactly as the model
/// wrote it. There is no retry and no auto-correction.
pub async fn generate_commit_message(
    ctx: &ReviewContext,
    root: &Path,
) -> Result<String, CommitError> {
    let changes = collect_changes(ctx.version_control(), root, ctx.exclusions()).await?;
    if changes.is_empty() {
        info!("No changes under {}", root.display());
        return Ok(NO_CHANGES_MESSAGE.to_string());
    }

    let summary = summarize(&changes);
    let request = CompletionRequest::new(COMMIT_SYSTEM_INSTRUCTION, build_commit_prompt(&summary));

    debug!(
        "Requesting commit message for {} file(s), prompt {} chars",
        changes.len(),
        request.prompt.len()
    );

    let completion = ctx.completion().complete(&request).await?;
    let candidate = completion.text.trim();
    if candidate.is_empty() {
        return Err(CompletionError::EmptyResponse.into());
    }

    let parsed = validate(candidate)?;
    debug!("Generated commit header: {}", parsed.header());

    Ok(candidate.to_string())
}
