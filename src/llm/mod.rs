//! Text-completion providers.

pub mod claude;
pub mod gemini;

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::config::Config;
use crate::error::CompletionError;

pub use claude::{ClaudeCli, check_claude_installed};
pub use gemini::GeminiClient;

/// A system instruction plus the user prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub system_instruction: String,
    pub prompt: String,
}

impl CompletionRequest {
    pub fn new(system_instruction: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            prompt: prompt.into(),
        }
    }
}

/// Raw text returned by a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
}

/// Opaque text-completion service.
///
/// This abstraction allows replacing the model with a fake in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, CompletionError>;
}

/// Supported completion providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Provider {
    #[default]
    Gemini,
    Claude,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Gemini => "gemini",
            Provider::Claude => "claude",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" | "google" => Ok(Provider::Gemini),
            "claude" => Ok(Provider::Claude),
            other => Err(format!("Unknown provider: {other}")),
        }
    }
}

/// Build the configured provider.
pub fn completion_service(config: &Config) -> Arc<dyn CompletionService> {
    match config.provider {
        Provider::Gemini => Arc::new(GeminiClient::new(
            config.gemini_base_url.clone(),
            config.model.clone(),
            config.gemini_api_key.clone(),
            config.timeout,
        )),
        Provider::Claude => {
            Arc::new(ClaudeCli::new(config.timeout).with_model(claude_model(config)))
        }
    }
}

/// Model to request from the Claude CLI.
///
/// The Gemini default means nothing was configured, so the CLI picks its own model.
fn claude_model(config: &Config) -> Option<String> {
    let model = config.model.trim();
    if model.is_empty() || model == gemini::DEFAULT_MODEL {
        return None;
    }
    if model.starts_with("gemini") || model.starts_with("models/") {
        warn!("Model {model} is a Gemini model, ignored for the claude provider");
        return None;
    }
    Some(model.to_string())
}

/// Run `fut`, bounded by `limit` when one is configured.
pub(crate) async fn with_timeout<T, F>(limit: Option<Duration>, fut: F) -> Result<T, CompletionError>
where
    F: Future<Output = Result<T, CompletionError>>,
{
    match limit {
        Some(duration) => tokio::time::timeout(duration, fut)
            .await
            .map_err(|_| CompletionError::Timeout(duration.as_secs()))?,
        None => fut.await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_str() {
        assert_eq!("gemini".parse::<Provider>(), Ok(Provider::Gemini));
        assert_eq!(" Claude ".parse::<Provider>(), Ok(Provider::Claude));
        assert!("openai".parse::<Provider>().is_err());
    }

    #[test]
    fn test_provider_display_round_trips() {
        for provider in [Provider::Gemini, Provider::Claude] {
            assert_eq!(provider.to_string().parse::<Provider>(), Ok(provider));
        }
    }

    #[test]
    fn test_claude_model_passthrough() {
        let mut config = Config {
            provider: Provider::Claude,
            ..Config::default()
        };
        assert_eq!(claude_model(&config), None);

        config.model = "claude-sonnet-4-5".to_string();
        assert_eq!(claude_model(&config).as_deref(), Some("claude-sonnet-4-5"));

        config.model = "gemini-2.5-pro".to_string();
        assert_eq!(claude_model(&config), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_with_timeout_expires() {
        let result: Result<(), CompletionError> =
            with_timeout(Some(Duration::from_secs(5)), std::future::pending()).await;
        assert!(matches!(result, Err(CompletionError::Timeout(5))));
    }

    #[tokio::test]
    async fn test_with_timeout_none_waits_for_result() {
        let result = with_timeout(None, async { Ok::<_, CompletionError>(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }
}
