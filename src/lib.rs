//! commitwise - A CLI tool that reviews working-tree changes and writes one conventional commit message.
//!
//! # Overview
//!
//! commitwise collects per-file diffs from a git working tree, renders them into a change summary,
//! asks a language model for a Conventional Commit message, and validates the answer before
//! returning it. The same operations are exposed as tools with declared input schemas so an
//! orchestrating agent can call them.

pub mod commit;
pub mod config;
pub mod context;
pub mod error;
pub mod git;
pub mod llm;
pub mod tools;

// Re-export commonly used types
pub use commit::{ChangeSet, ExclusionPolicy, FileDiff, ParsedCommit};
pub use config::Config;
pub use context::ReviewContext;
pub use error::{CommitError, CompletionError, GitError, ToolError};
pub use git::{Git2Repository, VersionControl};
pub use llm::{Completion, CompletionRequest, CompletionService, Provider};
pub use tools::{Tool, ToolRegistry};
