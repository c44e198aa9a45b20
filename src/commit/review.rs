//! File-by-file code review of the working-tree changes.

use std::path::Path;

use tracing::{debug, info};

use crate::commit::collect::collect_changes;
use crate::commit::prompt::{build_review_prompt, build_review_prompts};
use crate::commit::summary::summarize;
use crate::context::ReviewContext;
use crate::error::{CommitError, CompletionError};
use crate::llm::CompletionRequest;

/// Returned when there is nothing to review.
pub const NO_CHANGES_REVIEW: &str = "No changes detected.";

/// Review every pending change under `root` using the reviewer persona.
///
/// Returns the model's review with surrounding whitespace removed.
pub async fn review_changes(ctx: &ReviewContext, root: &Path) -> Result<String, CommitError> {
    let changes = collect_changes(ctx.version_control(), root, ctx.exclusions()).await?;
    if changes.is_empty() {
        info!("No changes under {}", root.display());
        return Ok(NO_CHANGES_REVIEW.to_string());
    }

    let prompts = build_review_prompts();
    let request = CompletionRequest::new(prompts.system, build_review_prompt(&summarize(&changes)));

    debug!(
        "Requesting review for {} file(s), prompt {} chars",
        changes.len(),
        request.prompt.len()
    );

    let completion = ctx.completion().complete(&request).await?;
    let review = completion.text.trim();
    if review.is_empty() {
        return Err(CompletionError::EmptyResponse.into());
    }

    Ok(review.to_string())
}
