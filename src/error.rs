//! Error types for commitwise modules using thiserror.

use thiserror::Error;

/// Errors from version-control queries.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Cannot access repository at '{root}': {reason}")]
    RepositoryAccess { root: String, reason: String },

    #[error("Failed to list changed files: {0}")]
    ChangedFiles(#[source] git2::Error),

    #[error("Failed to retrieve diff for '{path}': {reason}")]
    DiffRetrieval { path: String, reason: String },

    #[error("Repository task was cancelled or panicked: {0}")]
    TaskFailed(String),
}

impl GitError {
    /// Path of the file whose diff could not be retrieved, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            GitError::DiffRetrieval { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Errors from the text-completion service.
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("Claude Code CLI not found. Install with: npm install -g @anthropic-ai/claude-code")]
    NotInstalled,

    #[error("Failed to spawn completion process: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("Completion process exited with code {code}: {stderr}")]
    NonZeroExit { code: i32, stderr: String },

    #[error("Completion service reported an error: {0}")]
    ExecutionFailed(String),

    #[error("Completion request failed: {0}")]
    Http(#[source] reqwest::Error),

    #[error("Completion service responded with {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Completion service returned a malformed response: {0}")]
    MalformedResponse(String),

    #[error("Completion service returned no text")]
    EmptyResponse,

    #[error("Completion timed out after {0} seconds")]
    Timeout(u64),

    #[error("Missing API key: set {0}")]
    MissingApiKey(&'static str),
}

/// Errors from commit message generation and validation.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error("Generated commit message is not a valid Conventional Commit: {raw:?}")]
    InvalidCommitMessage { raw: String },
}

/// Errors surfaced by the tool adapters.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Invalid tool input: {0}")]
    SchemaValidation(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error(transparent)]
    Commit(#[from] CommitError),

    #[error("Failed to serialize tool output: {0}")]
    Serialization(#[source] serde_json::Error),
}

impl From<GitError> for ToolError {
    fn from(err: GitError) -> Self {
        ToolError::Commit(CommitError::Git(err))
    }
}
