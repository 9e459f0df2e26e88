//! Application configuration, constructed once at startup.

use std::path::PathBuf;

use crate::provider::Provider;

/// Default sampling temperature for every provider.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Name of the dotenv-style credential file.
pub const CREDENTIALS_FILE: &str = ".nullbot";

/// Resolved configuration for one run of the application.
///
/// Built from CLI arguments and passed by reference to the components
/// that need it. There is no global config.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Which hosted provider to talk to.
    pub provider: Provider,
    /// Model identifier; the provider's default unless overridden.
    pub model: String,
    /// Base URL override (tests point this at a mock server).
    pub base_url: Option<String>,
    /// Sampling temperature sent with every request.
    pub temperature: f64,
    /// Location of the credential file.
    pub credentials_path: PathBuf,
}

impl AppConfig {
    /// Config for a provider with its default model.
    pub fn for_provider(provider: Provider) -> Self {
        Self {
            model: provider.default_model().to_string(),
            provider,
            base_url: None,
            temperature: DEFAULT_TEMPERATURE,
            credentials_path: PathBuf::from(CREDENTIALS_FILE),
        }
    }

    /// Effective base URL: the override if set, else the provider's.
    pub fn base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| self.provider.base_url().to_string())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_provider(Provider::OpenRouter)
    }
}
