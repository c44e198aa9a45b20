//! libgit2-backed implementation of [`VersionControl`].
//!
//! The comparison baseline is the HEAD tree against the index and working tree together, so both
//! staged and unstaged edits to tracked files are reported. A repository without commits compares
//! against the empty tree. Untracked files are left out, matching `git diff`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use git2::{DiffFormat, DiffOptions, ErrorCode, Repository, Tree};
use tracing::debug;

use super::VersionControl;
use crate::error::GitError;

/// [`VersionControl`] backed by libgit2.
///
/// Every query opens its own repository handle on the blocking thread pool, so at most one handle
/// is live per in-flight query.
#[derive(Debug, Clone, Copy, Default)]
pub struct Git2Repository;

impl Git2Repository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl VersionControl for Git2Repository {
    async fn changed_files(&self, root: &Path) -> Result<Vec<String>, GitError> {
        let root = root.to_path_buf();
        tokio::task::spawn_blocking(move || list_changed_files(&root))
            .await
            .map_err(|e| GitError::TaskFailed(e.to_string()))?
    }

    async fn diff_for_path(&self, root: &Path, path: &str) -> Result<String, GitError> {
        let root = root.to_path_buf();
        let path = path.to_string();
        tokio::task::spawn_blocking(move || diff_for_path(&root, &path))
            .await
            .map_err(|e| GitError::TaskFailed(e.to_string()))?
    }
}

/// An opened repository plus the location of the analyzed root inside its working tree.
struct Workspace {
    repo: Repository,
    /// Root relative to the working tree (`/`-separated), `None` when they coincide.
    prefix: Option<String>,
}

impl Workspace {
    fn open(root: &Path) -> Result<Self, GitError> {
        let access = |reason: String| GitError::RepositoryAccess {
            root: root.display().to_string(),
            reason,
        };

        if root.as_os_str().is_empty() {
            return Err(access("root directory must not be empty".to_string()));
        }

        let canonical = root.canonicalize().map_err(|e| access(e.to_string()))?;
        if !canonical.is_dir() {
            return Err(access("not a directory".to_string()));
        }

        let repo = Repository::discover(&canonical).map_err(|e| access(e.message().to_string()))?;
        let workdir: PathBuf = repo
            .workdir()
            .ok_or_else(|| access("bare repository has no working tree".to_string()))?
            .canonicalize()
            .map_err(|e| access(e.to_string()))?;

        let prefix = canonical
            .strip_prefix(&workdir)
            .map_err(|_| access("root is outside the repository working tree".to_string()))?
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");

        Ok(Self {
            repo,
            prefix: (!prefix.is_empty()).then_some(prefix),
        })
    }

    /// Path relative to the working tree for a path relative to the root.
    fn repo_path(&self, path: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}/{path}"),
            None => path.to_string(),
        }
    }

    /// Path relative to the root, or `None` if the path lies outside it.
    fn root_path(&self, repo_path: &str) -> Option<String> {
        match &self.prefix {
            Some(prefix) => repo_path
                .strip_prefix(prefix.as_str())
                .and_then(|rest| rest.strip_prefix('/'))
                .map(str::to_string),
            None => Some(repo_path.to_string()),
        }
    }
}

/// Resolve the HEAD tree, distinguishing empty-repo errors from real failures.
///
/// Returns `Ok(None)` for repos with no commits (unborn branch / not found).
fn resolve_head_tree(repo: &Repository) -> Result<Option<Tree<'_>>, git2::Error> {
    let head_ref = match repo.head() {
        Ok(r) => r,
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    head_ref.peel_to_tree().map(Some)
}

/// List files with pending changes under `root`, in libgit2's delta order.
pub fn list_changed_files(root: &Path) -> Result<Vec<String>, GitError> {
    let workspace = Workspace::open(root)?;
    let repo = &workspace.repo;

    let head_tree = resolve_head_tree(repo).map_err(GitError::ChangedFiles)?;

    let mut opts = DiffOptions::new();
    // Literal match: directory names may contain glob characters such as `[slug]`.
    if let Some(prefix) = &workspace.prefix {
        opts.pathspec(prefix).disable_pathspec_match(true);
    }
    let diff = repo
        .diff_tree_to_workdir_with_index(head_tree.as_ref(), Some(&mut opts))
        .map_err(GitError::ChangedFiles)?;

    let files: Vec<String> = diff
        .deltas()
        .filter_map(|delta| {
            delta
                .new_file()
                .path()
                .or_else(|| delta.old_file().path())
                .map(|p| p.to_string_lossy().replace('\\', "/"))
        })
        .filter_map(|p| workspace.root_path(&p))
        .filter(|p| !p.is_empty())
        .collect();

    debug!("{} changed file(s) under {}", files.len(), root.display());
    Ok(files)
}

/// Unified diff text for one file, relative to `root`.
///
/// Any failure, including failing to reopen the repository, is reported as
/// [`GitError::DiffRetrieval`] carrying the path.
pub fn diff_for_path(root: &Path, path: &str) -> Result<String, GitError> {
    let retrieval = |reason: String| GitError::DiffRetrieval {
        path: path.to_string(),
        reason,
    };

    let workspace = Workspace::open(root).map_err(|e| retrieval(e.to_string()))?;
    let repo = &workspace.repo;

    let head_tree = resolve_head_tree(repo).map_err(|e| retrieval(e.message().to_string()))?;

    let mut opts = DiffOptions::new();
    opts.pathspec(workspace.repo_path(path))
        .disable_pathspec_match(true);
    let diff = repo
        .diff_tree_to_workdir_with_index(head_tree.as_ref(), Some(&mut opts))
        .map_err(|e| retrieval(e.message().to_string()))?;

    let mut text = String::new();
    diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        let origin = line.origin();
        if origin == '+' || origin == '-' || origin == ' ' {
            text.push(origin);
        }
        text.push_str(&String::from_utf8_lossy(line.content()));
        true
    })
    .map_err(|e| retrieval(e.message().to_string()))?;

    Ok(text)
}
