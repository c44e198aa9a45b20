//! Prompt construction for reviews and commit messages.

/// System instruction for commit message generation.
pub const COMMIT_SYSTEM_INSTRUCTION: &str =
    "You are a professional engineer. Only output a Conventional Commit message.";

/// Reviewer persona used as the system prompt for code reviews.
pub const REVIEW_SYSTEM_PROMPT: &str = r#"You are an expert code reviewer with years of experience in software engineering, clean code practices, and collaborative development. Your role is to give **clear, constructive, and actionable feedback** on code changes. You value clarity, correctness, maintainability, and alignment with team and industry best practices.

## Personality & Review Approach
- Professional, respectful, and collaborative.
- Empathetic to the author's intent and level of experience.
- Uses teaching moments when they help the author.

## Review Focus Areas
1. **Correctness**: does the code do what it intends to? Look for bugs, logic errors, edge cases, and regressions.
2. **Clarity**: is the code easy to read and reason about? Would clearer naming, structure, or comments help?
3. **Maintainability**: will this be easy to extend or debug later? Watch for over-complexity, duplication, or tight coupling.
4. **Consistency**: does the change follow the conventions, patterns, and formatting already in the codebase?
5. **Performance**: point out unnecessary inefficiencies or bottlenecks.
6. **Security**: watch for vulnerabilities, injection risks, or unsafe operations around input/output, authentication, or external APIs.
7. **Testing**: is there sufficient, meaningful, and reliable test coverage?
8. **Scalability & Robustness**: how does the code behave under load and at the edges, including error handling?

## How to Respond
1. **File-by-file review**:
   - For each file, summarize the changes.
   - Give a professional review with actionable suggestions where needed.
   - Acknowledge well-written or well-structured code.

2. **Single overall commit message**:
   - After reviewing all files, write **one commit message** that summarizes the whole change set.
   - Use the **Conventional Commit format**: `type(scope): description`.
   - The subject line must be 72 characters or fewer.
   - Optionally add a body explaining what was done and why.
   - Never write more than one commit message. Exactly one message represents the whole change set.

## Tone & Style
- Calm, concise, and supportive.
- Prefer phrasing such as:
  - "Consider refactoring this to improve clarity."
  - "Would it make sense to extract this logic into a helper function?"
  - "Is there a reason we avoided using X here?"
  - "Nice use of Y here, it makes the logic very clear."
- Skip nitpicks unless they hurt readability or break conventions. Mark nit-level suggestions clearly ("Nit: ...").

Review with the intent to **help the author succeed**, **improve the quality of the codebase**, and **keep the team moving**."#;

/// System prompts for a review session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewPrompts {
    pub system: String,
}

/// Static reviewer persona; identical on every call.
pub fn build_review_prompts() -> ReviewPrompts {
    ReviewPrompts {
        system: REVIEW_SYSTEM_PROMPT.to_string(),
    }
}

/// Build the prompt asking for a single Conventional Commit message.
///
/// `summary` is embedded verbatim.
pub fn build_commit_prompt(summary: &str) -> String {
    format!(
        "You are a professional software engineer.\n\
         Write a commit message in Conventional Commit format\n\
         (type(scope): description).\n\
         Here are the changes:\n\
         {summary}\n"
    )
}

/// Build the prompt for a file-by-file review of `summary`.
pub fn build_review_prompt(summary: &str) -> String {
    format!(
        "Review the following changes file by file, then finish with exactly one \
         Conventional Commit message for the whole change set.\n\n\
         {summary}\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_prompts_are_static() {
        assert_eq!(build_review_prompts(), build_review_prompts());
    }

    #[test]
    fn test_review_persona_covers_focus_areas() {
        let system = build_review_prompts().system;
        for area in [
            "Correctness",
            "Clarity",
            "Maintainability",
            "Consistency",
            "Performance",
            "Security",
            "Testing",
            "Scalability & Robustness",
        ] {
            assert!(system.contains(area), "missing focus area {area}");
        }
    }

    #[test]
    fn test_review_persona_demands_one_message() {
        let system = build_review_prompts().system;
        assert!(system.contains("File-by-file review"));
        assert!(system.contains("type(scope): description"));
        assert!(system.contains("72 characters"));
        assert!(system.contains("Never write more than one commit message"));
    }

    #[test]
    fn test_commit_prompt_embeds_summary_verbatim() {
        let summary = "File: README.md \nChanges: +hello";
        let prompt = build_commit_prompt(summary);
        assert!(prompt.contains(summary));
        assert!(prompt.contains("Conventional Commit format"));
        assert!(prompt.contains("(type(scope): description)"));
    }

    #[test]
    fn test_commit_prompt_only_varies_by_summary() {
        let a = build_commit_prompt("A");
        let b = build_commit_prompt("B");
        assert_eq!(a.replace('A', "B"), b);
    }

    #[test]
    fn test_review_prompt_embeds_summary() {
        let prompt = build_review_prompt("File: src/lib.rs \nChanges: +pub mod x;");
        assert!(prompt.contains("+pub mod x;"));
        assert!(prompt.contains("file by file"));
    }
}
