//! Change collection, summarization, and AI-generated commit messages.

pub mod collect;
pub mod exclude;
pub mod message;
pub mod prompt;
pub mod review;
pub mod summary;
pub mod validate;

pub use collect::{ChangeSet, FileDiff, collect_changes};
pub use exclude::{DEFAULT_EXCLUDES, ExclusionPolicy};
pub use message::{NO_CHANGES_MESSAGE, generate_commit_message};
pub use prompt::{
    COMMIT_SYSTEM_INSTRUCTION, REVIEW_SYSTEM_PROMPT, ReviewPrompts, build_commit_prompt,
    build_review_prompt, build_review_prompts,
};
pub use review::{NO_CHANGES_REVIEW, review_changes};
pub use summary::summarize;
pub use validate::{CommitType, ParsedCommit, SUBJECT_MAX_LEN, validate};
