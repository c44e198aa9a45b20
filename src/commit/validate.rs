//! Conventional Commit parsing and validation.

use std::sync::LazyLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::CommitError;

/// Subject length the model is asked to respect. Not enforced by [`validate`].
pub const SUBJECT_MAX_LEN: usize = 72;

// type(scope)!: subject
static HEADER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w+)(?:\(([^()]*)\))?(!)?: (.*)$").expect("header pattern is valid")
});

/// Conventional commit types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitType {
    Feat,
    Fix,
    Docs,
    Style,
    Refactor,
    Perf,
    Test,
    Build,
    Ci,
    Chore,
    Revert,
}

impl std::str::FromStr for CommitType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "feat" => Ok(Self::Feat),
            "fix" => Ok(Self::Fix),
            "docs" => Ok(Self::Docs),
            "style" => Ok(Self::Style),
            "refactor" => Ok(Self::Refactor),
            "perf" => Ok(Self::Perf),
            "test" => Ok(Self::Test),
            "build" => Ok(Self::Build),
            "ci" => Ok(Self::Ci),
            "chore" => Ok(Self::Chore),
            "revert" => Ok(Self::Revert),
            _ => Err(format!("Unknown commit type: {}", s)),
        }
    }
}

/// A commit message split into its Conventional Commit fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedCommit {
    #[serde(rename = "type")]
    pub commit_type: String,
    pub scope: Option<String>,
    pub subject: String,
    pub body: Option<String>,
    pub breaking: bool,
    /// `!` written after the type or scope.
    #[serde(skip)]
    pub breaking_mark: bool,
}

impl ParsedCommit {
    /// Known commit type, if the type is one of the standard ones.
    pub fn kind(&self) -> Option<CommitType> {
        self.commit_type.parse().ok()
    }

    /// Reassembled first line: `type(scope)!: subject`.
    pub fn header(&self) -> String {
        let scope = self
            .scope
            .as_deref()
            .map(|s| format!("({s})"))
            .unwrap_or_default();
        let bang = if self.breaking_mark { "!" } else { "" };
        format!("{}{scope}{bang}: {}", self.commit_type, self.subject)
    }

    /// Whether the header line is longer than [`SUBJECT_MAX_LEN`] characters.
    pub fn exceeds_subject_limit(&self) -> bool {
        self.header().chars().count() > SUBJECT_MAX_LEN
    }
}

fn has_breaking_footer(text: &str) -> bool {
    text.lines().any(|line| {
        let line = line.trim_start();
        line.starts_with("BREAKING CHANGE:") || line.starts_with("BREAKING-CHANGE:")
    })
}

/// Parse `raw` as a Conventional Commit.
///
/// The first non-blank line must be `type(scope): subject`; anything after the first blank line
/// following it is the body. Fails with [`CommitError::InvalidCommitMessage`] when the type or
/// subject is missing. Over-long subjects are accepted and only logged.
pub fn validate(raw: &str) -> Result<ParsedCommit, CommitError> {
    let invalid = || CommitError::InvalidCommitMessage {
        raw: raw.to_string(),
    };

    let mut lines = raw.trim_start().lines();
    let header = lines.next().map(str::trim).ok_or_else(invalid)?;

    let caps = HEADER_PATTERN.captures(header).ok_or_else(invalid)?;

    let commit_type = caps.get(1).map(|m| m.as_str()).unwrap_or("");
    let scope = caps
        .get(2)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    let breaking_mark = caps.get(3).is_some();
    let subject = caps.get(4).map(|m| m.as_str().trim()).unwrap_or("");

    if commit_type.is_empty() || subject.is_empty() {
        return Err(invalid());
    }

    let rest = lines.collect::<Vec<_>>().join("\n");
    let body = Some(rest.trim())
        .filter(|b| !b.is_empty())
        .map(str::to_string);

    let breaking = breaking_mark || body.as_deref().is_some_and(has_breaking_footer);

    let parsed = ParsedCommit {
        commit_type: commit_type.to_string(),
        scope,
        subject: subject.to_string(),
        body,
        breaking,
        breaking_mark,
    };

    if parsed.exceeds_subject_limit() {
        warn!(
            "Commit subject is {} characters, over the {} character guideline",
            parsed.header().chars().count(),
            SUBJECT_MAX_LEN
        );
    }

    Ok(parsed)
}
