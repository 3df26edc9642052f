//! CompletionProvider trait: the abstraction over the text-completion service.
//!
//! A provider takes a single prompt and a token budget and returns one or more
//! candidate completions. Implementations: OpenAI-compatible `/completions`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::error::ProviderError;

/// A single-prompt completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// The engine to use (e.g., "gpt-3.5-turbo-instruct")
    pub model: String,

    /// The fully assembled prompt
    pub prompt: String,

    /// Maximum tokens to generate
    pub max_tokens: u32,
}

/// One candidate completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionChoice {
    pub text: String,

    #[serde(default)]
    pub index: u32,

    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Token usage information.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Candidates in the order the service returned them; may be empty.
    pub choices: Vec<CompletionChoice>,

    /// Which model actually responded (may differ from requested)
    pub model: String,

    pub usage: Option<Usage>,
}

impl CompletionResponse {
    /// Text of the first choice with surrounding whitespace removed.
    pub fn first_text(&self) -> Option<&str> {
        self.choices.first().map(|c| c.text.trim())
    }
}

/// Every completion backend implements this trait.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// A human-readable name for this provider (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a request and get the complete response.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> std::result::Result<CompletionResponse, ProviderError>;

    /// Health check: can we reach the provider?
    async fn health_check(&self) -> std::result::Result<bool, ProviderError> {
        Ok(true)
    }
}
