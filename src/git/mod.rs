//! Version-control access using git2-rs.

pub mod repository;

use std::path::Path;

use async_trait::async_trait;

use crate::error::GitError;

pub use repository::{Git2Repository, diff_for_path, list_changed_files};

/// Read-only view of a repository's pending changes.
///
/// Paths are relative to the `root` passed in, using `/` separators.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VersionControl: Send + Sync {
    /// List changed files in the order the backend reports them.
    async fn changed_files(&self, root: &Path) -> Result<Vec<String>, GitError>;

    /// Unified diff text for a single changed file.
    async fn diff_for_path(&self, root: &Path, path: &str) -> Result<String, GitError>;
}
