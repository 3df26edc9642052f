//! Completion provider implementations for learnpal.
//!
//! All providers implement the `learnpal_core::CompletionProvider` trait.
//! [`build_from_config`] wires up the one the configuration describes.

pub mod openai_compat;

pub use openai_compat::OpenAiCompatProvider;

use std::sync::Arc;
use std::time::Duration;

use learnpal_config::AppConfig;
use learnpal_core::{CompletionProvider, ProviderError};

/// Build the completion provider described by `[completion]`.
///
/// A missing API key is not an error here: the provider is still built and
/// every completion call reports `NotConfigured`, so the rest of the API can
/// serve without credentials.
pub fn build_from_config(config: &AppConfig) -> Result<Arc<dyn CompletionProvider>, ProviderError> {
    let completion = &config.completion;
    if completion.api_key.is_none() {
        tracing::warn!("No completion API key configured; /ask_gpt/ will fail until one is set");
    }

    let provider = OpenAiCompatProvider::new(
        provider_name(&completion.api_url),
        completion.api_url.clone(),
        completion.api_key.clone(),
        Duration::from_secs(completion.timeout_secs),
    )?;
    Ok(Arc::new(provider))
}

/// "openai" for the public API, "openai-compatible" for anything else.
fn provider_name(api_url: &str) -> &'static str {
    if api_url.contains("api.openai.com") {
        "openai"
    } else {
        "openai-compatible"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_from_default_config() {
        let provider = build_from_config(&AppConfig::default()).unwrap();
        assert_eq!(provider.name(), "openai");
    }

    #[test]
    fn custom_endpoint_is_named_compatible() {
        let mut config = AppConfig::default();
        config.completion.api_url = "http://localhost:8080/v1".into();
        config.completion.api_key = Some("sk-local".into());
        let provider = build_from_config(&config).unwrap();
        assert_eq!(provider.name(), "openai-compatible");
    }
}
