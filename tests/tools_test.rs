//! Integration tests for the tool surface over a real repository.

mod common;

use std::sync::Arc;

use common::{FakeCompletion, TestRepo};
use serde_json::json;

use commitwise::commit::NO_CHANGES_MESSAGE;
use commitwise::{Git2Repository, ReviewContext, ToolError, ToolRegistry};

fn context(completion: &FakeCompletion) -> ReviewContext {
    ReviewContext::new(Arc::new(Git2Repository::new()), Arc::new(completion.clone()))
}

#[tokio::test]
async fn test_get_file_changes_returns_file_diff_objects() {
    let repo = TestRepo::new();
    repo.commit_files(&[("README.md", ""), ("dist/app.js", "")], "init");
    repo.write("README.md", "hello\n");
    repo.write("dist/app.js", "minified\n");

    let completion = FakeCompletion::replying("unused");
    let output = ToolRegistry::with_builtin_tools()
        .call(
            "getFileChanges",
            json!({ "rootDir": repo.path().to_string_lossy() }),
            &context(&completion),
        )
        .await
        .unwrap();

    let files = output.as_array().expect("output is an array");
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["file"], "README.md");
    assert!(files[0]["diff"].as_str().unwrap().contains("+hello"));
    assert_eq!(completion.call_count(), 0);
}

#[tokio::test]
async fn test_generate_commit_message_returns_string() {
    let repo = TestRepo::new();
    repo.commit_files(&[("README.md", "")], "init");
    repo.write("README.md", "hello\n");

    let completion = FakeCompletion::replying("docs: update readme\n");
    let output = ToolRegistry::with_builtin_tools()
        .call(
            "generateCommitMessage",
            json!({ "rootDir": repo.path().to_string_lossy() }),
            &context(&completion),
        )
        .await
        .unwrap();

    assert_eq!(output, json!("docs: update readme"));
}

#[tokio::test]
async fn test_clean_tree_returns_sentinel() {
    let repo = TestRepo::new();
    repo.commit_files(&[("README.md", "hello\n")], "init");

    let completion = FakeCompletion::replying("feat: unused");
    let output = ToolRegistry::with_builtin_tools()
        .call(
            "generateCommitMessage",
            json!({ "rootDir": repo.path().to_string_lossy() }),
            &context(&completion),
        )
        .await
        .unwrap();

    assert_eq!(output, json!(NO_CHANGES_MESSAGE));
    assert_eq!(completion.call_count(), 0);
}

#[tokio::test]
async fn test_schema_violations_are_rejected_before_io() {
    let completion = FakeCompletion::replying("feat: unused");
    let registry = ToolRegistry::with_builtin_tools();

    for name in ["getFileChanges", "generateCommitMessage"] {
        for input in [json!({ "rootDir": "" }), json!({}), json!({ "root_dir": "." })] {
            let err = registry
                .call(name, input.clone(), &context(&completion))
                .await
                .unwrap_err();
            assert!(
                matches!(err, ToolError::SchemaValidation(_)),
                "{name} accepted {input}"
            );
        }
    }
    assert_eq!(completion.call_count(), 0);
}

#[tokio::test]
async fn test_non_repository_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nowhere");

    let completion = FakeCompletion::replying("feat: unused");
    let err = ToolRegistry::with_builtin_tools()
        .call(
            "getFileChanges",
            json!({ "rootDir": missing.to_string_lossy() }),
            &context(&completion),
        )
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Cannot access repository"));
}
