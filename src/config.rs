//! Runtime configuration resolved from environment variables.
//!
//! CLI flags override these values in `main`.

use std::env;
use std::time::Duration;

use tracing::warn;

use crate::commit::ExclusionPolicy;
use crate::llm::Provider;
use crate::llm::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Completion provider selection.
pub const PROVIDER_ENV_VAR: &str = "COMMITWISE_PROVIDER";
/// Model name passed to the provider.
pub const MODEL_ENV_VAR: &str = "COMMITWISE_MODEL";
/// Optional completion timeout in seconds.
pub const TIMEOUT_ENV_VAR: &str = "COMMITWISE_TIMEOUT";
/// Comma-separated extra exclusion entries.
pub const EXCLUDE_ENV_VAR: &str = "COMMITWISE_EXCLUDE";
/// Gemini base URL override.
pub const GEMINI_URL_ENV_VAR: &str = "COMMITWISE_GEMINI_URL";
/// Gemini API key, with the AI SDK's variable name as a fallback.
pub const GEMINI_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_GENERATIVE_AI_API_KEY"];

#[derive(Debug, Clone)]
pub struct Config {
    pub provider: Provider,
    pub model: String,
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    /// `None` waits for the provider indefinitely.
    pub timeout: Option<Duration>,
    pub exclusions: ExclusionPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            model: DEFAULT_MODEL.to_string(),
            gemini_api_key: None,
            gemini_base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            exclusions: ExclusionPolicy::default(),
        }
    }
}

impl Config {
    /// Load configuration from the environment, falling back to defaults.
    ///
    /// Invalid values are logged and ignored rather than treated as errors.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let provider = non_empty_var(PROVIDER_ENV_VAR)
            .and_then(|value| match value.parse::<Provider>() {
                Ok(provider) => Some(provider),
                Err(e) => {
                    warn!("{e} in {PROVIDER_ENV_VAR}, using {}", defaults.provider);
                    None
                }
            })
            .unwrap_or(defaults.provider);

        let gemini_api_key = GEMINI_KEY_ENV_VARS.iter().find_map(|name| non_empty_var(name));

        let mut exclusions = defaults.exclusions;
        if let Some(extra) = non_empty_var(EXCLUDE_ENV_VAR) {
            exclusions.extend(extra.split(','));
        }

        Self {
            provider,
            model: non_empty_var(MODEL_ENV_VAR).unwrap_or(defaults.model),
            gemini_api_key,
            gemini_base_url: non_empty_var(GEMINI_URL_ENV_VAR).unwrap_or(defaults.gemini_base_url),
            timeout: get_timeout(),
            exclusions,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Get the configured completion timeout.
///
/// Logs a warning if the environment variable is set but contains an invalid value
/// (non-numeric, negative, or zero).
fn get_timeout() -> Option<Duration> {
    let value = non_empty_var(TIMEOUT_ENV_VAR)?;
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
        _ => {
            warn!("Invalid {TIMEOUT_ENV_VAR} value '{value}', no timeout applied");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_VARS: [&str; 7] = [
        PROVIDER_ENV_VAR,
        MODEL_ENV_VAR,
        TIMEOUT_ENV_VAR,
        EXCLUDE_ENV_VAR,
        GEMINI_URL_ENV_VAR,
        "GEMINI_API_KEY",
        "GOOGLE_GENERATIVE_AI_API_KEY",
    ];

    fn unset_all() -> Vec<(&'static str, Option<&'static str>)> {
        ALL_VARS.iter().map(|name| (*name, None)).collect()
    }

    #[test]
    fn test_defaults_without_environment() {
        temp_env::with_vars(unset_all(), || {
            let config = Config::from_env();
            assert_eq!(config.provider, Provider::Gemini);
            assert_eq!(config.model, DEFAULT_MODEL);
            assert_eq!(config.gemini_base_url, DEFAULT_BASE_URL);
            assert!(config.gemini_api_key.is_none());
            assert!(config.timeout.is_none());
            assert_eq!(config.exclusions, ExclusionPolicy::default());
        });
    }

    #[test]
    fn test_values_from_environment() {
        let mut vars = unset_all();
        vars.extend([
            (PROVIDER_ENV_VAR, Some("claude")),
            (MODEL_ENV_VAR, Some("gemini-2.5-pro")),
            (TIMEOUT_ENV_VAR, Some("60")),
            (EXCLUDE_ENV_VAR, Some("vendor, build/generated")),
            ("GOOGLE_GENERATIVE_AI_API_KEY", Some("secret")),
        ]);

        temp_env::with_vars(vars, || {
            let config = Config::from_env();
            assert_eq!(config.provider, Provider::Claude);
            assert_eq!(config.model, "gemini-2.5-pro");
            assert_eq!(config.timeout, Some(Duration::from_secs(60)));
            assert_eq!(config.gemini_api_key.as_deref(), Some("secret"));
            assert!(config.exclusions.is_excluded("vendor/lib.js"));
            assert!(config.exclusions.is_excluded("build/generated/x.rs"));
            assert!(config.exclusions.is_excluded("dist/bundle.js"));
        });
    }

    #[test]
    fn test_gemini_api_key_takes_precedence() {
        let mut vars = unset_all();
        vars.extend([
            ("GEMINI_API_KEY", Some("primary")),
            ("GOOGLE_GENERATIVE_AI_API_KEY", Some("fallback")),
        ]);

        temp_env::with_vars(vars, || {
            assert_eq!(Config::from_env().gemini_api_key.as_deref(), Some("primary"));
        });
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let mut vars = unset_all();
        vars.extend([
            (PROVIDER_ENV_VAR, Some("openai")),
            (TIMEOUT_ENV_VAR, Some("not_a_number")),
        ]);

        temp_env::with_vars(vars, || {
            let config = Config::from_env();
            assert_eq!(config.provider, Provider::Gemini);
            assert!(config.timeout.is_none());
        });
    }

    #[test]
    fn test_zero_timeout_is_ignored() {
        temp_env::with_var(TIMEOUT_ENV_VAR, Some("0"), || {
            assert!(get_timeout().is_none());
        });
    }
}
