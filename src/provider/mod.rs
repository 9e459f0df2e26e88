//! Chat-completion provider trait and implementations.

pub mod http;
pub mod openai_compat;

use async_trait::async_trait;
use futures::stream::BoxStream;
use strum::{Display, EnumString};

use crate::config::AppConfig;
use crate::error::NullBotError;
use crate::types::{ChatDelta, ChatMessage};

/// The fixed set of hosted providers NullBot can talk to.
///
/// Every provider speaks the OpenAI-compatible chat-completions wire
/// format; they differ only in base URL and default model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Provider {
    #[strum(serialize = "openrouter")]
    OpenRouter,
    #[strum(serialize = "deepseek")]
    DeepSeek,
    HuggingFace,
    Gemini,
}

impl Provider {
    /// The provider's API base URL.
    pub fn base_url(&self) -> &'static str {
        match self {
            Self::OpenRouter => "https://openrouter.ai/api/v1",
            Self::DeepSeek => "https://api.deepseek.com",
            Self::HuggingFace => "https://api.huggingface.co",
            Self::Gemini => "https://generativelanguage.googleapis.com/v1beta",
        }
    }

    /// Default model identifier for this provider.
    pub fn default_model(&self) -> &'static str {
        match self {
            Self::OpenRouter => "mistralai/mistral-small-24b-instruct-2501:free",
            Self::DeepSeek => "deepseek-chat",
            Self::HuggingFace => "mistralai/Mistral-Small-24B-Instruct-2501",
            Self::Gemini => "gemini-2.0-flash",
        }
    }

    /// All supported providers, for help text and validation messages.
    pub fn all() -> &'static [Provider] {
        &[
            Self::OpenRouter,
            Self::DeepSeek,
            Self::HuggingFace,
            Self::Gemini,
        ]
    }
}

/// A chat-completion request: full history plus sampling settings.
///
/// The model identifier lives on the provider instance, not the request.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
}

/// Core trait implemented by chat-completion providers.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Provider name (e.g., "openrouter").
    fn provider_name(&self) -> &str;
    /// The model ID this provider instance serves.
    fn model_id(&self) -> &str;

    /// Open a streaming completion for the given request.
    ///
    /// The returned stream is finite and non-restartable: it yields text
    /// fragments in arrival order, then a `Done` delta. A transport or
    /// provider failure surfaces as an `Err` item, after which the
    /// stream yields nothing further.
    async fn stream_chat(
        &self,
        request: &ChatRequest,
    ) -> Result<BoxStream<'static, Result<ChatDelta, NullBotError>>, NullBotError>;

    /// Cheap credential check, used once at startup.
    async fn verify(&self) -> Result<(), NullBotError>;
}

/// Create the provider described by the config.
pub fn create_provider(config: &AppConfig, api_key: String) -> Box<dyn ChatProvider> {
    Box::new(openai_compat::OpenAiCompatProvider::new(
        config.provider.to_string(),
        config.model.clone(),
        api_key,
        config.base_url(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn provider_parses_kebab_case_names() {
        assert_eq!(Provider::from_str("openrouter").unwrap(), Provider::OpenRouter);
        assert_eq!(Provider::from_str("deepseek").unwrap(), Provider::DeepSeek);
        assert_eq!(
            Provider::from_str("hugging-face").unwrap(),
            Provider::HuggingFace
        );
        assert_eq!(Provider::from_str("gemini").unwrap(), Provider::Gemini);
    }

    #[test]
    fn unknown_provider_is_an_error() {
        assert!(Provider::from_str("skynet").is_err());
    }

    #[test]
    fn provider_display_round_trips() {
        for provider in Provider::all() {
            let name = provider.to_string();
            assert_eq!(Provider::from_str(&name).unwrap(), *provider);
        }
    }

    #[test]
    fn every_provider_has_base_url_and_model() {
        for provider in Provider::all() {
            assert!(provider.base_url().starts_with("https://"));
            assert!(!provider.default_model().is_empty());
        }
    }

    #[test]
    fn create_provider_uses_config_model_and_url() {
        let mut config = AppConfig::for_provider(Provider::DeepSeek);
        config.model = "deepseek-reasoner".into();
        let provider = create_provider(&config, "sk-test".into());
        assert_eq!(provider.provider_name(), "deepseek");
        assert_eq!(provider.model_id(), "deepseek-reasoner");
    }
}
