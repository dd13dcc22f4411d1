//! LLM integration for IntelliSQL.
//!
//! Provides the client trait, provider selection, and the translation
//! pipeline that turns a natural-language question into a SQL statement.

pub mod extract;
pub mod gemini;
pub mod mock;
pub mod prompt;
pub mod translator;

pub use extract::extract_sql;
pub use gemini::{GeminiClient, GeminiConfig};
pub use mock::MockLlmClient;
pub use prompt::build_prompt;
pub use translator::Translator;

use async_trait::async_trait;
use std::str::FromStr;

use crate::error::{IntelliError, Result};

/// Trait for LLM clients that can generate completions.
///
/// Implementations must be thread-safe (Send + Sync) to support async operations.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Generates a completion for the given prompt.
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Returns the provider name for display purposes.
    fn provider_name(&self) -> &str;
}

/// Available LLM providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LlmProvider {
    /// Google Gemini API.
    #[default]
    Gemini,
    /// Mock client for testing.
    Mock,
}

impl LlmProvider {
    /// Returns the provider name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            LlmProvider::Gemini => "gemini",
            LlmProvider::Mock => "mock",
        }
    }
}

impl FromStr for LlmProvider {
    type Err = IntelliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "gemini" => Ok(LlmProvider::Gemini),
            "mock" => Ok(LlmProvider::Mock),
            _ => Err(IntelliError::config(format!(
                "Unknown LLM provider: '{}'. Valid options: gemini, mock",
                s
            ))),
        }
    }
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Creates an LLM client for the given provider.
///
/// For Gemini, the API key is resolved from the `api_key` argument first,
/// then from the `GEMINI_API_KEY` environment variable. When no model is
/// given, `GEMINI_MODEL` applies, then the built-in default.
pub fn create_client(
    provider: LlmProvider,
    api_key: Option<String>,
    model: Option<String>,
) -> Result<Box<dyn LlmClient>> {
    match provider {
        LlmProvider::Gemini => {
            let api_key = api_key
                .or_else(|| std::env::var("GEMINI_API_KEY").ok())
                .ok_or_else(|| {
                    IntelliError::config(
                        "No API key found. Set the GEMINI_API_KEY environment variable.",
                    )
                })?;

            let model = model
                .or_else(|| std::env::var("GEMINI_MODEL").ok())
                .unwrap_or_else(|| gemini::DEFAULT_MODEL.to_string());

            let client = GeminiClient::new(GeminiConfig::new(api_key, model))?;
            Ok(Box::new(client))
        }
        LlmProvider::Mock => Ok(Box::new(MockLlmClient::new())),
    }
}
