//! Claude CLI spawning.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use super::{Completion, CompletionRequest, CompletionService, with_timeout};
use crate::error::CompletionError;

const CLAUDE_PROGRAM: &str = "claude";

/// Check if Claude Code CLI is installed and accessible.
///
/// Uses the `which` crate for cross-platform executable detection.
pub async fn check_claude_installed() -> Result<(), CompletionError> {
    if which::which(CLAUDE_PROGRAM).is_err() {
        return Err(CompletionError::NotInstalled);
    }

    let version_check = Command::new(CLAUDE_PROGRAM)
        .arg("--version")
        .output()
        .await
        .map_err(CompletionError::SpawnFailed)?;

    if !version_check.status.success() {
        return Err(CompletionError::NotInstalled);
    }

    Ok(())
}

/// [`CompletionService`] that shells out to `claude -p`.
pub struct ClaudeCli {
    program: OsString,
    model: Option<String>,
    timeout: Option<Duration>,
}

impl ClaudeCli {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self::with_program(CLAUDE_PROGRAM, timeout)
    }

    /// Use a different executable speaking the same CLI contract.
    pub fn with_program(program: impl Into<OsString>, timeout: Option<Duration>) -> Self {
        Self {
            program: program.into(),
            model: None,
            timeout,
        }
    }

    /// Ask the CLI for a specific model instead of its own default.
    pub fn with_model(mut self, model: Option<String>) -> Self {
        self.model = model;
        self
    }

    fn args<'a>(&'a self, request: &'a CompletionRequest) -> Vec<&'a str> {
        let mut args = vec![
            "-p",
            request.prompt.as_str(),
            "--system-prompt",
            request.system_instruction.as_str(),
            "--output-format",
            "json",
        ];
        if let Some(model) = &self.model {
            args.extend(["--model", model.as_str()]);
        }
        args
    }

    async fn run(&self, request: &CompletionRequest) -> Result<Completion, CompletionError> {
        debug!(
            "Running {} (prompt {} chars)",
            self.program.to_string_lossy(),
            request.prompt.len()
        );

        let output = Command::new(&self.program)
            .args(self.args(request))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => CompletionError::NotInstalled,
                _ => CompletionError::SpawnFailed(e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            let code = output.status.code().unwrap_or(-1);
            return Err(CompletionError::NonZeroExit { code, stderr });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_claude_response(&stdout)
    }
}

#[async_trait]
impl CompletionService for ClaudeCli {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, CompletionError> {
        with_timeout(self.timeout, self.run(request)).await
    }
}

/// Claude CLI JSON envelope when using --output-format json
#[derive(serde::Deserialize)]
struct ClaudeCliResponse {
    result: String,
    #[serde(default)]
    is_error: bool,
}

/// Unwrap the CLI envelope. Anything else on stdout is a malformed response.
fn parse_claude_response(response: &str) -> Result<Completion, CompletionError> {
    let envelope: ClaudeCliResponse = serde_json::from_str(response.trim()).map_err(|e| {
        CompletionError::MalformedResponse(format!("expected Claude CLI JSON envelope: {e}"))
    })?;
    if envelope.is_error {
        return Err(CompletionError::ExecutionFailed(envelope.result));
    }
    let text = envelope.result;

    if text.trim().is_empty() {
        return Err(CompletionError::EmptyResponse);
    }

    Ok(Completion { text })
}
