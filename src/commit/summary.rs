//! Render a change set into the text block embedded in model prompts.

use crate::commit::collect::ChangeSet;

/// Join every file's diff as `File: {path} \nChanges: {diff}`, separated by a blank line.
///
/// An empty change set renders as the empty string.
pub fn summarize(changes: &ChangeSet) -> String {
    changes
        .iter()
        .map(|file| format!("File: {} \nChanges: {}", file.path, file.diff_text))
        .collect::<Vec<_>>()
        .join("\n\n")
}
