//! Change collection: one diff per changed file, in the order the backend lists them.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::commit::exclude::ExclusionPolicy;
use crate::error::GitError;
use crate::git::VersionControl;

/// Diff for a single changed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDiff {
    /// Path relative to the analyzed root.
    #[serde(rename = "file")]
    pub path: String,
    /// Unified diff text for this file.
    #[serde(rename = "diff")]
    pub diff_text: String,
}

impl FileDiff {
    pub fn new(path: impl Into<String>, diff_text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            diff_text: diff_text.into(),
        }
    }
}

/// Ordered per-file diffs for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeSet {
    files: Vec<FileDiff>,
}

impl ChangeSet {
    pub fn new(files: Vec<FileDiff>) -> Self {
        Self { files }
    }

    pub fn files(&self) -> &[FileDiff] {
        &self.files
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileDiff> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn into_files(self) -> Vec<FileDiff> {
        self.files
    }
}

impl From<Vec<FileDiff>> for ChangeSet {
    fn from(files: Vec<FileDiff>) -> Self {
        Self::new(files)
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a FileDiff;
    type IntoIter = std::slice::Iter<'a, FileDiff>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

/// Collect the diffs of every changed, non-excluded file under `root`.
///
/// Issues one listing query and then one diff query per retained file, strictly one after
/// another. The first failing diff aborts the collection with [`GitError::DiffRetrieval`]
/// naming that file; no partial change set is returned.
pub async fn collect_changes(
    vcs: &dyn VersionControl,
    root: &Path,
    policy: &ExclusionPolicy,
) -> Result<ChangeSet, GitError> {
    if root.as_os_str().is_empty() {
        return Err(GitError::RepositoryAccess {
            root: String::new(),
            reason: "root directory must not be empty".to_string(),
        });
    }

    let paths = vcs.changed_files(root).await?;
    let listed = paths.len();

    let mut files = Vec::new();
    for path in paths {
        if policy.is_excluded(&path) {
            debug!("Skipping excluded file {path}");
            continue;
        }

        debug!("Fetching diff for {path}");
        let diff_text = vcs
            .diff_for_path(root, &path)
            .await
            .map_err(|e| match e {
                GitError::DiffRetrieval { .. } => e,
                other => GitError::DiffRetrieval {
                    path: path.clone(),
                    reason: other.to_string(),
                },
            })?;

        files.push(FileDiff { path, diff_text });
    }

    debug!(
        "Collected {} of {} changed file(s) ({} excluded)",
        files.len(),
        listed,
        listed - files.len()
    );

    Ok(ChangeSet::new(files))
}
