//! OpenAI-compatible completion provider.
//!
//! Talks to the legacy text-completion endpoint (`POST {base}/completions`)
//! exposed by OpenAI and by most self-hosted gateways (vLLM, LocalAI, Ollama's
//! OpenAI shim). One prompt in, a list of text choices out.

use std::time::Duration;

use async_trait::async_trait;
use learnpal_core::error::ProviderError;
use learnpal_core::provider::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Fallback wait reported for a 429 without a usable `Retry-After` header.
const DEFAULT_RETRY_AFTER_SECS: u64 = 5;

/// An OpenAI-compatible text-completion provider.
pub struct OpenAiCompatProvider {
    name: String,
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl std::fmt::Debug for OpenAiCompatProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiCompatProvider")
            .field("name", &self.name)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl OpenAiCompatProvider {
    /// Create a new provider. Every request is bounded by `timeout`.
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("HTTP client: {e}")))?;

        Ok(Self {
            name: name.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn to_api_request(request: &CompletionRequest) -> ApiRequest<'_> {
        ApiRequest {
            model: &request.model,
            prompt: &request.prompt,
            max_tokens: request.max_tokens,
        }
    }

    fn bearer(&self) -> Result<String, ProviderError> {
        self.api_key
            .as_ref()
            .map(|key| format!("Bearer {key}"))
            .ok_or_else(|| {
                ProviderError::NotConfigured(format!("no API key configured for '{}'", self.name))
            })
    }
}

/// Classify a transport failure.
fn transport_error(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout(e.to_string())
    } else {
        ProviderError::Network(e.to_string())
    }
}

fn retry_after(headers: &reqwest::header::HeaderMap) -> u64 {
    headers
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

#[async_trait]
impl CompletionProvider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> std::result::Result<CompletionResponse, ProviderError> {
        let url = format!("{}/completions", self.base_url);
        let auth = self.bearer()?;

        debug!(
            provider = %self.name,
            model = %request.model,
            prompt_chars = request.prompt.len(),
            "Sending completion request"
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", auth)
            .header("Content-Type", "application/json")
            .json(&Self::to_api_request(&request))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(ProviderError::RateLimited {
                retry_after_secs: retry_after(response.headers()),
            });
        }

        if status == 401 || status == 403 {
            return Err(ProviderError::AuthenticationFailed(
                "Invalid API key or insufficient permissions".into(),
            ));
        }

        if !(200..300).contains(&status) {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Provider returned error");
            return Err(ProviderError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let api_response: ApiResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout(e.to_string())
            } else {
                ProviderError::ApiError {
                    status_code: status,
                    message: format!("Failed to parse response: {e}"),
                }
            }
        })?;

        debug!(
            provider = %self.name,
            choices = api_response.choices.len(),
            "Completion received"
        );

        Ok(api_response.into_completion(&request.model))
    }

    async fn health_check(&self) -> std::result::Result<bool, ProviderError> {
        let url = format!("{}/models", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("Authorization", self.bearer()?)
            .send()
            .await
            .map_err(transport_error)?;

        Ok(response.status().is_success())
    }
}

// --- OpenAI wire types ---

#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<ApiChoice>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    usage: Option<ApiUsage>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    #[serde(default)]
    text: String,
    #[serde(default)]
    index: u32,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

impl ApiResponse {
    fn into_completion(self, requested_model: &str) -> CompletionResponse {
        CompletionResponse {
            choices: self
                .choices
                .into_iter()
                .map(|c| CompletionChoice {
                    text: c.text,
                    index: c.index,
                    finish_reason: c.finish_reason,
                })
                .collect(),
            model: self.model.unwrap_or_else(|| requested_model.to_string()),
            usage: self.usage.map(|u| Usage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
        }
    }
}
